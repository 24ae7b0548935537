use thiserror::Error;

/// 工作流程的兩個頂層步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    CreateSandbox,
    DeployMetadata,
}

impl WorkflowStep {
    /// Console line printed when the step fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            WorkflowStep::CreateSandbox => "Sandbox creation failed.",
            WorkflowStep::DeployMetadata => "Metadata deployment failed.",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStep::CreateSandbox => write!(f, "sandbox creation"),
            WorkflowStep::DeployMetadata => write!(f, "metadata deployment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Error \"{stderr}\" when executing command: \"{command}\"")]
    CommandError { stderr: String, command: String },

    #[error("Failed to start command \"{command}\": {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Must provide either a data path or plan")]
    MissingImportSource,

    #[error("Sandbox definition error in {path}: {message}")]
    DefinitionError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{step} failed: {source}")]
    StepFailed {
        step: WorkflowStep,
        #[source]
        source: Box<SandboxError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ExternalCommand,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SandboxError {
    pub fn step_failed(step: WorkflowStep, source: SandboxError) -> Self {
        SandboxError::StepFailed {
            step,
            source: Box::new(source),
        }
    }

    /// 取得最內層的錯誤 (去掉步驟包裝)
    pub fn root(&self) -> &SandboxError {
        match self {
            SandboxError::StepFailed { source, .. } => source.root(),
            other => other,
        }
    }

    // root() 不會回傳 StepFailed，下列委派分支只為了讓 match 完整
    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            SandboxError::CommandError { .. }
            | SandboxError::SpawnError { .. }
            | SandboxError::MissingImportSource => ErrorCategory::ExternalCommand,
            SandboxError::SerializationError(_) | SandboxError::DefinitionError { .. } => {
                ErrorCategory::Data
            }
            SandboxError::ConfigError { .. }
            | SandboxError::ConfigValidationError { .. }
            | SandboxError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SandboxError::IoError(_) => ErrorCategory::System,
            SandboxError::StepFailed { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.root() {
            SandboxError::MissingImportSource
            | SandboxError::InvalidConfigValueError { .. } => ErrorSeverity::Medium,
            SandboxError::CommandError { .. }
            | SandboxError::SerializationError(_)
            | SandboxError::DefinitionError { .. } => ErrorSeverity::High,
            SandboxError::SpawnError { .. }
            | SandboxError::IoError(_)
            | SandboxError::ConfigError { .. }
            | SandboxError::ConfigValidationError { .. } => ErrorSeverity::Critical,
            SandboxError::StepFailed { source, .. } => source.severity(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            SandboxError::CommandError { .. } => {
                "Check the sfdx output above; make sure the source org is authorized and the sandbox name is unused"
            }
            SandboxError::SpawnError { .. } => {
                "Install the Salesforce CLI and make sure the configured program is on PATH"
            }
            SandboxError::SerializationError(_) => {
                "The command did not print valid JSON; run it manually with --json to inspect the output"
            }
            SandboxError::MissingImportSource => "Pass either --path or --plan",
            SandboxError::DefinitionError { .. } => {
                "Make sure the sandbox definition template is a JSON object"
            }
            SandboxError::IoError(_) => "Check file paths and permissions",
            SandboxError::ConfigError { .. }
            | SandboxError::ConfigValidationError { .. }
            | SandboxError::InvalidConfigValueError { .. } => {
                "Review the command line arguments and the settings file"
            }
            SandboxError::StepFailed { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SandboxError::StepFailed { step, source } => {
                format!("{}\nError message: {}", step.failure_message(), source)
            }
            other => other.to_string(),
        }
    }

    /// 依錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Critical if !matches!(self, SandboxError::StepFailed { .. }) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SandboxError>;
