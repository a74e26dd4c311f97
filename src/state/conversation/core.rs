use super::state::{ConversationManager, TurnPhase};
use crate::api::logging::emit_dropped_tail;
use crate::api::stream::{decode_data_event, StreamFramer};
use crate::types::{AskRequest, ChatTurn};
use crate::ui::presenter::TurnPresenter;
use anyhow::{bail, Result};
use futures::StreamExt;

impl ConversationManager {
    /// Runs one question/answer cycle end to end: issues the request with
    /// the current history window, renders the answer as it streams in, and
    /// commits the turn pair on success. A failed turn annotates the partial
    /// answer and leaves the history untouched.
    pub async fn ask(
        &mut self,
        question: &str,
        enable_rag: bool,
        presenter: &mut dyn TurnPresenter,
    ) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            bail!("question must not be empty");
        }
        if self.is_turn_in_progress() {
            bail!("a turn is already in flight");
        }

        self.phase = TurnPhase::Sending;
        presenter.user_message(question);
        presenter.answer_pending();

        let outcome = self.stream_answer(question, enable_rag, presenter).await;
        self.phase = TurnPhase::Idle;

        match outcome {
            Ok(answer) => {
                presenter.answer_complete();
                self.history.append(ChatTurn::user(question));
                self.history.append(ChatTurn::model(answer.clone()));
                Ok(answer)
            }
            Err(error) => {
                presenter.answer_error(&error.to_string());
                Err(error)
            }
        }
    }

    async fn stream_answer(
        &mut self,
        question: &str,
        enable_rag: bool,
        presenter: &mut dyn TurnPresenter,
    ) -> Result<String> {
        let mut stream = {
            let request = AskRequest {
                question,
                enable_rag,
                history: self.history.window(self.history_window),
            };
            self.client.ask(&request).await?
        };
        self.phase = TurnPhase::Streaming;

        let mut framer = StreamFramer::new();
        let mut answer = String::new();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            for frame in framer.process(&chunk) {
                let Some(payload) = decode_data_event(&frame) else {
                    continue;
                };
                answer.push_str(&payload);
                presenter.answer_update(&self.renderer.render(&answer));
            }
        }

        // Only separator-terminated frames carry meaning; a leftover tail is
        // a truncated transfer and must not reach the answer or the history.
        let tail = framer.finish();
        if !tail.is_empty() {
            emit_dropped_tail(&tail);
        }

        Ok(answer)
    }
}
