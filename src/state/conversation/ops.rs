use super::state::ConversationManager;
use crate::api::client::document_file_name;
use crate::types::BackendAck;
use anyhow::{bail, Context, Result};
use std::path::Path;

impl ConversationManager {
    /// Feeds one document to the backend's knowledge base. The file is read
    /// here, before any request goes out; the backend answers with either a
    /// `message` or an `error`, and both are surfaced verbatim, the latter
    /// as the returned error.
    pub async fn upload_document(&mut self, path: &Path) -> Result<String> {
        if self.is_turn_in_progress() {
            bail!("a turn is already in flight");
        }

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        let ack = self.client.upload(&document_file_name(path), bytes).await?;
        ack_message(ack, "upload")
    }

    /// Asks the backend to forget every learned document, then clears the
    /// local conversation log: retained turns may reference facts the
    /// backend no longer knows, which would poison future answers. A failed
    /// reset leaves the log alone.
    pub async fn reset_knowledge_base(&mut self) -> Result<String> {
        if self.is_turn_in_progress() {
            bail!("a turn is already in flight");
        }

        let ack = self.client.reset().await?;
        let message = ack_message(ack, "reset")?;
        self.history.clear();
        Ok(message)
    }
}

pub(super) fn ack_message(ack: BackendAck, operation: &str) -> Result<String> {
    if let Some(error) = ack.error {
        bail!("{error}");
    }
    match ack.message {
        Some(message) => Ok(message),
        None => bail!("{operation} reply carried neither message nor error"),
    }
}
