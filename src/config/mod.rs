pub mod definition;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::SandboxRequest;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sfdx-sandbox")]
#[command(about = "Create new sandbox and load data and settings")]
pub struct CliConfig {
    /// New sandbox sfdx alias
    #[arg(long)]
    pub alias: String,

    /// New sandbox name
    #[arg(long = "name")]
    pub sandbox_name: String,

    /// Production org or sandbox to clone
    #[arg(long = "sourceorg")]
    pub source_org: String,

    /// Path to a TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not draw the loading bar
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn request(&self) -> SandboxRequest {
        SandboxRequest {
            alias: self.alias.clone(),
            sandbox_name: self.sandbox_name.clone(),
            source_org: self.source_org.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_org_identifier("alias", &self.alias)?;
        validation::validate_org_identifier("name", &self.sandbox_name)?;
        validation::validate_org_identifier("sourceorg", &self.source_org)?;
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        Ok(())
    }
}
