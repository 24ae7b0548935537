use crate::domain::model::{SfdxCommand, DEFAULT_PROGRAM};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{Result, SandboxError};
use serde_json::Value;

pub const DEFAULT_DEFINITION: &str = "./config/dev-sandbox-def.json";
pub const DEFAULT_WAIT_MINUTES: u32 = 30;
pub const DEFAULT_SOURCE_PATH: &str = "./force-app/";

/// Typed wrappers around the sfdx commands used by the tooling.
pub struct Sfdx<R: CommandRunner> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> Sfdx<R> {
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, DEFAULT_PROGRAM)
    }

    pub fn with_program(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn command(&self, namespace: &str) -> SfdxCommand {
        SfdxCommand::new(self.program.as_str(), namespace)
    }

    pub async fn run(&self, command: SfdxCommand) -> Result<Value> {
        self.runner.run(&command).await
    }

    /// 從 source org 複製出新的 sandbox，等待最多 `wait_minutes` 分鐘
    pub async fn create_sandbox(
        &self,
        alias: &str,
        source_org: &str,
        definition: &str,
        wait_minutes: u32,
    ) -> Result<Value> {
        let command = self
            .command("force:org:create")
            .flag_value("-t", "sandbox")
            .flag_value("-u", source_org)
            .flag_value("-f", definition)
            .flag_value("-a", alias)
            .flag_value("-w", wait_minutes.to_string());
        self.run(command).await
    }

    pub async fn deploy(&self, username: &str, path: &str) -> Result<Value> {
        let command = self
            .command("force:source:deploy")
            .flag_value("-f", path)
            .flag_value("-u", username);
        self.run(command).await
    }

    pub async fn list_orgs(&self) -> Result<Value> {
        self.run(self.command("force:org:list")).await
    }

    /// Runs an anonymous Apex file against `username`.
    pub async fn execute_apex(&self, username: &str, path: &str) -> Result<Value> {
        let command = self
            .command("force:apex:execute")
            .flag_value("-u", username)
            .flag_value("-f", path);
        self.run(command).await
    }

    /// Imports records from a plan file or a single data file. The plan wins
    /// when both are given.
    pub async fn data_import(
        &self,
        username: &str,
        path: Option<&str>,
        plan: Option<&str>,
    ) -> Result<Value> {
        let command = self
            .command("force:data:tree:import")
            .flag_value("-u", username);

        let command = match (non_empty(plan), non_empty(path)) {
            (Some(plan), _) => command.flag_value("-p", plan),
            (None, Some(path)) => command.flag_value("-f", path),
            (None, None) => return Err(SandboxError::MissingImportSource),
        };

        self.run(command).await
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
