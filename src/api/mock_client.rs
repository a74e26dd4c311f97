use crate::api::client::{ByteStream, MockBackend};
use crate::types::{AskRequest, BackendAck};
use anyhow::{anyhow, Result};
use bytes::Bytes;
use futures::stream;
use std::sync::{Arc, Mutex};

/// One scripted piece of an answer stream. Chunk boundaries are preserved
/// exactly as written, so tests control where the framer sees splits.
#[derive(Clone)]
pub enum ScriptedChunk {
    Bytes(&'static str),
    TransportError(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAsk {
    pub question: String,
    pub enable_rag: bool,
    pub history_len: usize,
}

#[derive(Clone, Default)]
pub struct MockApiClient {
    responses: Arc<Mutex<Vec<Vec<ScriptedChunk>>>>,
    upload_acks: Arc<Mutex<Vec<BackendAck>>>,
    reset_acks: Arc<Mutex<Vec<BackendAck>>>,
    recorded: Arc<Mutex<Vec<RecordedAsk>>>,
}

impl MockApiClient {
    pub fn new(responses: Vec<Vec<ScriptedChunk>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    pub fn with_upload_ack(self, ack: BackendAck) -> Self {
        self.upload_acks.lock().unwrap().push(ack);
        self
    }

    pub fn with_reset_ack(self, ack: BackendAck) -> Self {
        self.reset_acks.lock().unwrap().push(ack);
        self
    }

    pub fn recorded_asks(&self) -> Vec<RecordedAsk> {
        self.recorded.lock().unwrap().clone()
    }
}

impl MockBackend for MockApiClient {
    fn create_mock_stream(&self, request: &AskRequest<'_>) -> Result<ByteStream> {
        self.recorded.lock().unwrap().push(RecordedAsk {
            question: request.question.to_string(),
            enable_rag: request.enable_rag,
            history_len: request.history.len(),
        });

        let mut responses_guard = self.responses.lock().unwrap();
        if responses_guard.is_empty() {
            return Err(anyhow!("MockApiClient: no more responses configured"));
        }
        let chunks = responses_guard.remove(0);

        let items: Vec<Result<Bytes>> = chunks
            .into_iter()
            .map(|chunk| match chunk {
                ScriptedChunk::Bytes(text) => Ok(Bytes::from(text)),
                ScriptedChunk::TransportError(message) => Err(anyhow!(message)),
            })
            .collect();

        Ok(Box::pin(stream::iter(items)))
    }

    fn upload_ack(&self, _file_name: &str) -> Result<BackendAck> {
        let mut acks = self.upload_acks.lock().unwrap();
        if acks.is_empty() {
            return Err(anyhow!("MockApiClient: no upload ack configured"));
        }
        Ok(acks.remove(0))
    }

    fn reset_ack(&self) -> Result<BackendAck> {
        let mut acks = self.reset_acks.lock().unwrap();
        if acks.is_empty() {
            return Err(anyhow!("MockApiClient: no reset ack configured"));
        }
        Ok(acks.remove(0))
    }
}
