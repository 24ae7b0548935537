use crate::utils::error::{Result, SandboxError};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const SANDBOX_NAME_FIELD: &str = "sandboxName";

/// Reads the sandbox definition template and returns it with `sandboxName`
/// replaced. Other fields keep their order.
pub fn render_definition(template: &Path, sandbox_name: &str) -> Result<Value> {
    let content = fs::read_to_string(template)?;
    let mut definition: Value = serde_json::from_str(&content)?;

    let fields = definition
        .as_object_mut()
        .ok_or_else(|| SandboxError::DefinitionError {
            path: template.display().to_string(),
            message: "template must be a JSON object".to_string(),
        })?;
    fields.insert(
        SANDBOX_NAME_FIELD.to_string(),
        Value::String(sandbox_name.to_string()),
    );

    Ok(definition)
}

/// 以 4 格縮排輸出 JSON
pub fn to_indented_json(value: &Value) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Temporary definition file. Deleted when dropped.
#[derive(Debug)]
pub struct TempDefinition {
    path: PathBuf,
}

impl TempDefinition {
    /// Writes the rendered template to `temp_path`, replacing any stale copy.
    pub fn create(template: &Path, temp_path: &Path, sandbox_name: &str) -> Result<Self> {
        let definition = render_definition(template, sandbox_name)?;

        if let Some(parent) = temp_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(temp_path, to_indented_json(&definition)?)?;

        tracing::debug!(
            "Wrote sandbox definition for '{}' to {}",
            sandbox_name,
            temp_path.display()
        );

        Ok(Self {
            path: temp_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

impl Drop for TempDefinition {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}
