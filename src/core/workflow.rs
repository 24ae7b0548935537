use crate::config::definition::TempDefinition;
use crate::config::toml_config::SandboxSettings;
use crate::core::sfdx::Sfdx;
use crate::domain::model::SandboxRequest;
use crate::domain::ports::CommandRunner;
use crate::utils::error::{Result, SandboxError, WorkflowStep};
use crate::utils::progress::{with_loading_bar, LoadingBar};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub sandbox: Value,
    pub deployment: Value,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl WorkflowReport {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Creates a sandbox from the definition template, then deploys metadata into
/// it. Each step is awaited in turn with the loading bar running alongside.
pub struct SandboxWorkflow<R: CommandRunner> {
    sfdx: Sfdx<R>,
    settings: SandboxSettings,
}

impl<R: CommandRunner> SandboxWorkflow<R> {
    pub fn new(sfdx: Sfdx<R>, settings: SandboxSettings) -> Self {
        Self { sfdx, settings }
    }

    pub fn sfdx(&self) -> &Sfdx<R> {
        &self.sfdx
    }

    fn loading_bar(&self) -> LoadingBar {
        if self.settings.progress.enabled {
            LoadingBar::new(self.settings.progress.interval())
        } else {
            LoadingBar::hidden()
        }
    }

    pub async fn run(&self, request: &SandboxRequest) -> Result<WorkflowReport> {
        let started_at = Utc::now();
        tracing::info!(
            "Creating sandbox '{}' ({}) from {}",
            request.sandbox_name,
            request.alias,
            request.source_org
        );

        let sandbox = self
            .create_sandbox(request)
            .await
            .map_err(|e| SandboxError::step_failed(WorkflowStep::CreateSandbox, e))?;

        // sandbox 建立失敗時不會執行部署
        let deployment = self
            .deploy_metadata(request)
            .await
            .map_err(|e| SandboxError::step_failed(WorkflowStep::DeployMetadata, e))?;

        let report = WorkflowReport {
            sandbox,
            deployment,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!("Workflow finished in {}s", report.elapsed().num_seconds());
        Ok(report)
    }

    /// Writes the temporary definition, runs `force:org:create` and removes the
    /// temporary file whatever the outcome.
    pub async fn create_sandbox(&self, request: &SandboxRequest) -> Result<Value> {
        println!("Creating sandbox...");

        let settings = &self.settings.sandbox;
        let definition = TempDefinition::create(
            Path::new(&settings.definition_template),
            Path::new(&settings.temp_definition),
            &request.sandbox_name,
        )?;

        let definition_path = definition.path_str();
        let result = with_loading_bar(
            self.loading_bar(),
            self.sfdx.create_sandbox(
                &request.alias,
                &request.source_org,
                &definition_path,
                settings.wait_minutes,
            ),
        )
        .await;
        drop(definition);

        let value = result?;
        println!("Sandbox is ready!");
        Ok(value)
    }

    pub async fn deploy_metadata(&self, request: &SandboxRequest) -> Result<Value> {
        println!("Deploying metadata...");

        let value = with_loading_bar(
            self.loading_bar(),
            self.sfdx.deploy(&request.alias, &self.settings.deploy.source_path),
        )
        .await?;

        println!("Deployment complete!");
        Ok(value)
    }
}
