//! Linter configuration.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator as SchemaValidator;
use serde::{Deserialize, Serialize};

use crate::error::LinterError;
use crate::validator::{CommandValidator, ValidatorOptions};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<SchemaValidator, String>> = OnceLock::new();

/// Config file names looked up by [`LintConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".apiblintrc.jsonc", ".apiblintrc.json"];

/// Configuration for a lint run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    /// Line tolerance when matching against the ignore baseline.
    #[serde(default = "default_fuzzy_line_range")]
    pub fuzzy_line_range: usize,

    /// Context lines around a highlighted warning.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Codes suppressed in every document.
    #[serde(default)]
    pub ignore_codes: Vec<String>,

    /// Suffix appended to a document path to locate its ignore file.
    #[serde(default = "default_ignore_file_ext")]
    pub ignore_file_ext: String,

    /// Extensions of documents picked up from directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from discovery.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// External validator settings.
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Rewrite every ignore file to cover the current warnings.
    #[serde(skip)]
    pub update_baseline: bool,

    /// Directory the configuration was loaded from. Exclude globs are also
    /// matched relative to it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_fuzzy_line_range() -> usize {
    5
}

fn default_context_lines() -> usize {
    2
}

fn default_ignore_file_ext() -> String {
    ".apiblint".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["apib".to_string()]
}

/// How to run the external validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    #[serde(default = "default_validator_command")]
    pub command: String,

    #[serde(default = "default_validator_args")]
    pub args: Vec<String>,

    #[serde(default = "default_true")]
    pub require_blueprint_name: bool,

    /// Argument passed when `require_blueprint_name` is set. Nothing is
    /// passed by default.
    #[serde(default)]
    pub require_name_arg: Option<String>,
}

fn default_validator_command() -> String {
    "drafter".to_string()
}

fn default_validator_args() -> Vec<String> {
    vec!["--format".to_string(), "json".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            command: default_validator_command(),
            args: default_validator_args(),
            require_blueprint_name: true,
            require_name_arg: None,
        }
    }
}

impl ValidatorConfig {
    pub fn options(&self) -> ValidatorOptions {
        ValidatorOptions {
            require_blueprint_name: self.require_blueprint_name,
        }
    }

    pub fn build(&self) -> CommandValidator {
        CommandValidator::new(
            self.command.clone(),
            self.args.clone(),
            self.require_name_arg.clone(),
        )
    }
}

impl LintConfig {
    /// Creates a configuration with every default.
    pub fn new() -> Self {
        Self {
            fuzzy_line_range: default_fuzzy_line_range(),
            context_lines: default_context_lines(),
            ignore_codes: Vec::new(),
            ignore_file_ext: default_ignore_file_ext(),
            extensions: default_extensions(),
            exclude: Vec::new(),
            validator: ValidatorConfig::default(),
            update_baseline: false,
            base_dir: None,
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.apiblintrc.jsonc`, `.apiblintrc.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON (comments allowed) with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                SchemaValidator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| LinterError::Internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Finds a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Path of the ignore file belonging to `document`.
    pub fn ignore_file_for(&self, document: &Path) -> PathBuf {
        let mut name = document.as_os_str().to_os_string();
        name.push(&self.ignore_file_ext);
        PathBuf::from(name)
    }

    pub fn global_ignore_codes(&self) -> HashSet<String> {
        self.ignore_codes.iter().cloned().collect()
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::new()
    }
}
