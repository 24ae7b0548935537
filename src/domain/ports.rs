use crate::domain::model::SfdxCommand;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Executes a built command and returns its decoded JSON output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &SfdxCommand) -> Result<serde_json::Value>;
}
