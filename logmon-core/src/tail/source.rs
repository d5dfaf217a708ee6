use crate::tail::error::TailError;
use async_trait::async_trait;
use tokio::sync::mpsc;

#[async_trait]
pub trait LineSource: Send {
    /// Next complete line without its terminator.
    ///
    /// `Ok(None)` means the source is exhausted and will never yield again.
    async fn next_line(&mut self) -> Result<Option<String>, TailError>;
}

#[async_trait]
impl LineSource for mpsc::Receiver<String> {
    async fn next_line(&mut self) -> Result<Option<String>, TailError> {
        Ok(self.recv().await)
    }
}

#[async_trait]
impl LineSource for mpsc::UnboundedReceiver<String> {
    async fn next_line(&mut self) -> Result<Option<String>, TailError> {
        Ok(self.recv().await)
    }
}
