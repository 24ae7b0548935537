use std::fmt;

pub const DEFAULT_PROGRAM: &str = "sfdx";
pub const JSON_FLAG: &str = "--json";

/// One command-line flag with an optional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub value: Option<String>,
}

/// A fully structured sfdx invocation: program, command namespace and ordered
/// flags. `--json` is always appended as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfdxCommand {
    program: String,
    namespace: String,
    flags: Vec<Flag>,
}

impl SfdxCommand {
    pub fn new(program: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            namespace: namespace.into(),
            flags: Vec::new(),
        }
    }

    /// Flag without a value, e.g. `--all`.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.push(Flag {
            name: name.into(),
            value: None,
        });
        self
    }

    pub fn flag_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.push(Flag {
            name: name.into(),
            value: Some(value.into()),
        });
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Process arguments in order: namespace, each flag followed by its value
    /// (empty values are dropped), then `--json`.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.flags.len() * 2 + 2);
        args.push(self.namespace.clone());

        for flag in &self.flags {
            args.push(flag.name.clone());
            if let Some(value) = flag.value.as_deref().filter(|v| !v.is_empty()) {
                args.push(value.to_string());
            }
        }

        args.push(JSON_FLAG.to_string());
        args
    }
}

impl fmt::Display for SfdxCommand {
    /// Shell-quoted command line, for logs and error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args();
        let words = std::iter::once(self.program.as_str()).chain(args.iter().map(String::as_str));
        write!(f, "{}", shell_words::join(words))
    }
}

/// Input of the create-and-deploy workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRequest {
    /// sfdx alias assigned to the new sandbox
    pub alias: String,
    /// Sandbox name written into the definition file
    pub sandbox_name: String,
    /// Production org or sandbox to clone
    pub source_org: String,
}
