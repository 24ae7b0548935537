use crate::core::sfdx::{DEFAULT_DEFINITION, DEFAULT_SOURCE_PATH, DEFAULT_WAIT_MINUTES};
use crate::domain::model::DEFAULT_PROGRAM;
use crate::utils::error::{Result, SandboxError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_TEMP_DEFINITION: &str = "./config/temp-sandbox-def.json";
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Settings shared by the binaries. Every section and field is optional in the
/// TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxSettings {
    pub cli: CliSettings,
    pub sandbox: SandboxDefinitionSettings,
    pub deploy: DeploySettings,
    pub progress: ProgressSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub program: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxDefinitionSettings {
    pub definition_template: String,
    pub temp_definition: String,
    pub wait_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploySettings {
    pub source_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    pub enabled: bool,
    pub interval_ms: u64,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Default for SandboxDefinitionSettings {
    fn default() -> Self {
        Self {
            definition_template: DEFAULT_DEFINITION.to_string(),
            temp_definition: DEFAULT_TEMP_DEFINITION.to_string(),
            wait_minutes: DEFAULT_WAIT_MINUTES,
        }
    }
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            source_path: DEFAULT_SOURCE_PATH.to_string(),
        }
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl ProgressSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl SandboxSettings {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SandboxError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 沒有指定檔案時使用預設值
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SandboxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SFDX_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SandboxError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for SandboxSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("cli.program", &self.cli.program)?;
        validation::validate_path(
            "sandbox.definition_template",
            &self.sandbox.definition_template,
        )?;
        validation::validate_path("sandbox.temp_definition", &self.sandbox.temp_definition)?;

        if self.sandbox.definition_template == self.sandbox.temp_definition {
            return Err(SandboxError::InvalidConfigValueError {
                field: "sandbox.temp_definition".to_string(),
                value: self.sandbox.temp_definition.clone(),
                reason: "Temporary definition would overwrite the template".to_string(),
            });
        }

        // sfdx 的 --wait 以分鐘計，上限一天
        validation::validate_range("sandbox.wait_minutes", self.sandbox.wait_minutes, 1, 1440)?;
        validation::validate_path("deploy.source_path", &self.deploy.source_path)?;
        validation::validate_range("progress.interval_ms", self.progress.interval_ms, 10, 5000)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = SandboxSettings::from_toml_str("").unwrap();

        assert_eq!(settings, SandboxSettings::default());
        assert_eq!(settings.cli.program, "sfdx");
        assert_eq!(settings.sandbox.wait_minutes, 30);
        assert_eq!(settings.sandbox.temp_definition, "./config/temp-sandbox-def.json");
        assert_eq!(settings.deploy.source_path, "./force-app/");
        assert_eq!(settings.progress.interval(), Duration::from_millis(100));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let toml_content = r#"
[sandbox]
wait_minutes = 60

[progress]
enabled = false
"#;

        let settings = SandboxSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.sandbox.wait_minutes, 60);
        assert_eq!(settings.sandbox.definition_template, DEFAULT_DEFINITION);
        assert!(!settings.progress.enabled);
        assert_eq!(settings.progress.interval_ms, 100);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SFDX_SANDBOX_TEST_PROGRAM", "/usr/local/bin/sfdx");

        let toml_content = r#"
[cli]
program = "${SFDX_SANDBOX_TEST_PROGRAM}"
"#;

        let settings = SandboxSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.cli.program, "/usr/local/bin/sfdx");

        std::env::remove_var("SFDX_SANDBOX_TEST_PROGRAM");
    }

    #[test]
    fn test_invalid_toml() {
        let err = SandboxSettings::from_toml_str("[sandbox\nwait_minutes = ").unwrap_err();
        assert!(matches!(err, SandboxError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = SandboxSettings::default();
        settings.sandbox.wait_minutes = 0;
        assert!(settings.validate().is_err());

        let mut settings = SandboxSettings::default();
        settings.sandbox.temp_definition = settings.sandbox.definition_template.clone();
        assert!(settings.validate().is_err());

        let mut settings = SandboxSettings::default();
        settings.cli.program = " ".to_string();
        assert!(settings.validate().is_err());

        let settings = SandboxSettings::from_toml_str("[progress]\ninterval_ms = 0\n").unwrap();
        assert_eq!(settings.progress.interval(), Duration::ZERO);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[deploy]\nsource_path = \"./src/\"\n")
            .unwrap();

        let settings = SandboxSettings::load(temp_file.path().to_str()).unwrap();
        assert_eq!(settings.deploy.source_path, "./src/");
    }
}
