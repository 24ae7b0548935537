pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::toml_config::SandboxSettings;
pub use crate::core::{runner::ProcessRunner, sfdx::Sfdx, workflow::SandboxWorkflow};
pub use domain::model::{SandboxRequest, SfdxCommand};
pub use domain::ports::CommandRunner;
pub use utils::error::{Result, SandboxError};
