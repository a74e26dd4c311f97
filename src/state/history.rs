use crate::types::ChatTurn;

/// Default number of turns sent as context: 10 question/answer pairs.
pub const CONTEXT_WINDOW_TURNS: usize = 20;

/// Ordered log of the conversation. Storage is unbounded; the transmitted
/// context is a read-time projection of the most recent turns, so clamping
/// happens on read, never on write.
#[derive(Debug, Default)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent `limit` turns in original order, fewer if the log is
    /// shorter. Pure read.
    pub fn window(&self, limit: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(limit);
        &self.turns[start..]
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Empties the log. Used on knowledge-base reset: retained turns may
    /// reference facts the backend has just forgotten.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with_turns(count: usize) -> ChatHistory {
        let mut history = ChatHistory::new();
        for i in 0..count {
            if i % 2 == 0 {
                history.append(ChatTurn::user(format!("question {i}")));
            } else {
                history.append(ChatTurn::model(format!("answer {i}")));
            }
        }
        history
    }

    #[test]
    fn test_window_projects_most_recent_turns_in_order() {
        let history = history_with_turns(30);
        let window = history.window(CONTEXT_WINDOW_TURNS);
        assert_eq!(window.len(), 20);
        assert_eq!(window[0].content, "question 10");
        assert_eq!(window[19].content, "answer 29");
        // Projection only: storage stays at full length.
        assert_eq!(history.len(), 30);
    }

    #[test]
    fn test_window_shorter_history_returns_everything() {
        let history = history_with_turns(5);
        let window = history.window(CONTEXT_WINDOW_TURNS);
        assert_eq!(window.len(), 5);
        assert_eq!(window[0].content, "question 0");
    }

    #[test]
    fn test_clear_empties_the_window() {
        let mut history = history_with_turns(8);
        history.clear();
        assert!(history.window(CONTEXT_WINDOW_TURNS).is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_repeated_identical_turns_are_kept() {
        let mut history = ChatHistory::new();
        history.append(ChatTurn::user("same"));
        history.append(ChatTurn::user("same"));
        assert_eq!(history.len(), 2);
    }
}
