/// Frame separator of the answer stream: one blank line.
const SEPARATOR: &[u8] = b"\n\n";

/// Payload prefix of a data-bearing frame. Anything else is protocol noise
/// (the gateway injects plain-text frames on upstream hiccups) and must be
/// skipped, not treated as an error.
const DATA_PREFIX: &str = "data:";

/// Reassembles arbitrarily chunked bytes into separator-terminated frames.
///
/// The buffer is kept as raw bytes so a multi-byte UTF-8 character split
/// across two network reads survives intact; the separator itself is ASCII,
/// so scanning for it never lands inside a character.
#[derive(Default)]
pub struct StreamFramer {
    buffer: Vec<u8>,
}

impl StreamFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one chunk and returns every frame completed by it, in order.
    /// A chunk that is only a separator yields an empty frame; empty chunks
    /// are no-ops.
    pub fn process(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(offset) = find_separator(&self.buffer[start..]) {
            let end = start + offset;
            frames.push(String::from_utf8_lossy(&self.buffer[start..end]).into_owned());
            start = end + SEPARATOR.len();
        }

        if start > 0 {
            self.buffer.drain(..start);
        }

        frames
    }

    /// Hands back whatever is buffered after the stream ends. The residue is
    /// an unterminated frame; callers decide whether to log or drop it.
    pub fn finish(&mut self) -> String {
        String::from_utf8_lossy(&std::mem::take(&mut self.buffer)).into_owned()
    }
}

fn find_separator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(SEPARATOR.len())
        .position(|window| window == SEPARATOR)
}

/// Extracts the answer payload from one completed frame.
///
/// Returns `None` for non-data frames. The `data:` prefix is stripped
/// exactly; the transport escapes embedded newlines as backslash-n to keep
/// each frame on one textual line, so that escape is reversed here.
pub fn decode_data_event(frame: &str) -> Option<String> {
    let payload = frame.trim_start().strip_prefix(DATA_PREFIX)?;
    Some(payload.replace("\\n", "\n"))
}
