use crate::domain::model::SfdxCommand;
use crate::domain::ports::CommandRunner;
use crate::utils::error::{Result, SandboxError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands as child processes, without a shell.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &SfdxCommand) -> Result<serde_json::Value> {
        let command_line = command.to_string();
        tracing::debug!("Executing: {}", command_line);

        let output = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| SandboxError::SpawnError {
                command: command_line.clone(),
                source,
            })?;

        // stderr 有任何輸出都視為失敗，不看退出碼
        if !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::error!("{}", stderr.trim_end());
            return Err(SandboxError::CommandError {
                stderr,
                command: command_line,
            });
        }

        if !output.status.success() {
            tracing::warn!(
                "Command exited with {} but wrote nothing to stderr: {}",
                output.status,
                command_line
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value: serde_json::Value = serde_json::from_str(stdout.trim())?;
        Ok(value)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    // `sh -c <script> --json`: the trailing flag lands in $0 and is ignored.
    fn script(body: &str) -> SfdxCommand {
        SfdxCommand::new("sh", "-c").flag(body)
    }

    #[tokio::test]
    async fn test_json_stdout_is_returned_unchanged() {
        let command = script(r#"printf '%s\n' '{"status":0,"result":{"orgs":["a","b"],"count":2}}'"#);
        let value = assert_ok!(ProcessRunner::new().run(&command).await);

        assert_eq!(
            value,
            json!({"status": 0, "result": {"orgs": ["a", "b"], "count": 2}})
        );
    }

    #[tokio::test]
    async fn test_stderr_fails_even_on_zero_exit() {
        let command = script(r#"echo 'warning: update available' >&2; echo '{"status":0}'; exit 0"#);
        let err = assert_err!(ProcessRunner::new().run(&command).await);

        match err {
            SandboxError::CommandError { stderr, command } => {
                assert!(stderr.contains("warning: update available"));
                assert!(command.contains("sh"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stderr_fails_on_nonzero_exit() {
        let command = script(r#"echo 'ERROR: No authorization found' >&2; exit 1"#);
        let err = assert_err!(ProcessRunner::new().run(&command).await);

        match err {
            SandboxError::CommandError { stderr, .. } => {
                assert!(stderr.contains("No authorization found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_without_stderr_returns_json() {
        let command = script(r#"echo '{"status":1,"message":"No org found"}'; exit 1"#);
        let value = assert_ok!(ProcessRunner::new().run(&command).await);
        assert_eq!(value["status"], 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_serialization_error() {
        let command = script("echo 'not json'");
        let err = assert_err!(ProcessRunner::new().run(&command).await);
        assert!(matches!(err, SandboxError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_a_spawn_error() {
        let command = SfdxCommand::new("definitely-not-sfdx-12345", "force:org:list");
        let err = assert_err!(ProcessRunner::new().run(&command).await);
        assert!(matches!(err, SandboxError::SpawnError { .. }));
    }
}
