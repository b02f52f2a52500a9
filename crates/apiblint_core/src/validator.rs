//! The validator boundary.
//!
//! The document grammar is not ours: an external validator parses the text
//! and reports annotations. [`CommandValidator`] runs the `drafter` command
//! line tool and decodes its API Elements JSON; tests inject their own
//! [`Validator`].

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::LinterError;
use crate::warning::{RawPosition, RawSegment, RawWarning};

/// Options forwarded to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorOptions {
    pub require_blueprint_name: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            require_blueprint_name: true,
        }
    }
}

/// What the validator said about a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Nothing to report.
    Clean,
    /// A parse result carrying warnings, in validator order.
    Warnings(Vec<RawWarning>),
    /// Output that is neither a success nor a parse result.
    Unrecognized(String),
}

/// Produces raw warnings for a document's text.
pub trait Validator: Send + Sync {
    fn validate(
        &self,
        source: &str,
        options: &ValidatorOptions,
    ) -> Result<ValidationOutcome, LinterError>;
}

/// Runs an external validator process.
///
/// The document is written to the process's stdin and its stdout is decoded
/// as an API Elements parse result.
#[derive(Debug, Clone)]
pub struct CommandValidator {
    command: String,
    args: Vec<String>,
    require_name_arg: Option<String>,
}

impl CommandValidator {
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        require_name_arg: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            require_name_arg,
        }
    }

    fn build_command(&self, options: &ValidatorOptions) -> Command {
        let mut command = Command::new(&self.command);
        command.args(&self.args);
        if options.require_blueprint_name
            && let Some(arg) = &self.require_name_arg
        {
            command.arg(arg);
        }
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }
}

impl Validator for CommandValidator {
    fn validate(
        &self,
        source: &str,
        options: &ValidatorOptions,
    ) -> Result<ValidationOutcome, LinterError> {
        let mut child = self.build_command(options).spawn().map_err(|e| {
            LinterError::validator(format!("Failed to start '{}': {}", self.command, e))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| LinterError::Internal("Validator stdin is not piped".to_string()))?;
        let input = source.to_owned();
        // Feed stdin from another thread so a chatty child cannot block on a
        // full stdout pipe while we are still writing.
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output().map_err(|e| {
            LinterError::validator(format!("Failed to wait for '{}': {}", self.command, e))
        })?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => {
                return Err(LinterError::validator(format!(
                    "Failed to write document to '{}': {}",
                    self.command, e
                )));
            }
            Err(_) => {
                return Err(LinterError::Internal(
                    "Validator stdin writer panicked".to_string(),
                ));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = stdout.trim();
        debug!(
            "Validator '{}' exited with {} ({} bytes of output)",
            self.command,
            output.status,
            stdout.len()
        );

        if stdout.is_empty() {
            return if output.status.success() {
                Ok(ValidationOutcome::Clean)
            } else {
                Err(LinterError::validator(format!(
                    "'{}' exited with {}: {}",
                    self.command,
                    output.status,
                    stderr.trim()
                )))
            };
        }

        match serde_json::from_str::<Value>(stdout) {
            Ok(value) => Ok(decode_parse_result(&value)),
            Err(e) if output.status.success() => Ok(ValidationOutcome::Unrecognized(format!(
                "output is not JSON: {}",
                e
            ))),
            Err(_) => Err(LinterError::validator(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            ))),
        }
    }
}

/// Decodes an API Elements document into a validation outcome.
///
/// `null` means success. A `parseResult` contributes its `annotation`
/// elements; any other shape is unrecognized. Source map problems are left
/// in the raw warning so normalization can report them.
pub fn decode_parse_result(value: &Value) -> ValidationOutcome {
    if value.is_null() {
        return ValidationOutcome::Clean;
    }

    let element = value.get("element").and_then(Value::as_str);
    if element != Some("parseResult") {
        return ValidationOutcome::Unrecognized(format!(
            "expected a parseResult element, found {}",
            element.map_or_else(|| "no element".to_string(), |e| format!("'{e}'"))
        ));
    }

    let items = match value.get("content") {
        Some(Value::Array(items)) => items.as_slice(),
        None | Some(Value::Null) => &[],
        Some(_) => {
            return ValidationOutcome::Unrecognized(
                "parseResult content is not an array".to_string(),
            );
        }
    };

    let mut warnings = Vec::new();
    for item in items {
        if item.get("element").and_then(Value::as_str) != Some("annotation") {
            continue;
        }
        match decode_annotation(item) {
            Ok(warning) => warnings.push(warning),
            Err(reason) => return ValidationOutcome::Unrecognized(reason),
        }
    }

    if warnings.is_empty() {
        ValidationOutcome::Clean
    } else {
        ValidationOutcome::Warnings(warnings)
    }
}

fn decode_annotation(annotation: &Value) -> Result<RawWarning, String> {
    let code = match annotation.pointer("/attributes/code/content") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => return Err("annotation has no code".to_string()),
    };
    let description = annotation
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("annotation {code} has no description"))?
        .to_string();

    let source_map = annotation
        .pointer("/attributes/sourceMap/content/0/content")
        .and_then(Value::as_array)
        .map(|segments| segments.iter().map(decode_segment).collect())
        .unwrap_or_default();

    Ok(RawWarning {
        code,
        description,
        source_map,
    })
}

fn decode_segment(segment: &Value) -> RawSegment {
    RawSegment::new(
        decode_position(segment.pointer("/content/0")),
        decode_position(segment.pointer("/content/1")),
    )
}

fn decode_position(position: Option<&Value>) -> RawPosition {
    let attribute = |name: &str| {
        position
            .and_then(|p| p.pointer(&format!("/attributes/{name}/content")))
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    };
    RawPosition {
        line: attribute("line"),
        column: attribute("column"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn position(line: u64, column: u64) -> Value {
        json!({
            "element": "number",
            "attributes": {
                "line": { "element": "number", "content": line },
                "column": { "element": "number", "content": column }
            },
            "content": 0
        })
    }

    fn annotation(code: u64, description: &str, segments: Vec<(Value, Value)>) -> Value {
        json!({
            "element": "annotation",
            "meta": { "classes": { "element": "array", "content": [
                { "element": "string", "content": "warning" }
            ]}},
            "attributes": {
                "code": { "element": "number", "content": code },
                "sourceMap": { "element": "array", "content": [{
                    "element": "sourceMap",
                    "content": segments
                        .into_iter()
                        .map(|(start, end)| json!({ "element": "array", "content": [start, end] }))
                        .collect::<Vec<_>>()
                }]}
            },
            "content": description
        })
    }

    #[test]
    fn test_null_is_clean() {
        assert_eq!(decode_parse_result(&Value::Null), ValidationOutcome::Clean);
    }

    #[test]
    fn test_parse_result_without_annotations_is_clean() {
        let value = json!({
            "element": "parseResult",
            "content": [{ "element": "category", "content": [] }]
        });
        assert_eq!(decode_parse_result(&value), ValidationOutcome::Clean);
    }

    #[test]
    fn test_decodes_annotations_in_order() {
        let value = json!({
            "element": "parseResult",
            "content": [
                { "element": "category", "content": [] },
                annotation(10, "headers is expected to be a pre-formatted code block", vec![
                    (position(21, 7), position(21, 80)),
                    (position(22, 1), position(22, 75)),
                ]),
                annotation(6, "no value(s) specified", vec![
                    (position(127, 7), position(127, 38)),
                ]),
            ]
        });

        let ValidationOutcome::Warnings(warnings) = decode_parse_result(&value) else {
            panic!("Expected warnings");
        };
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].code, "10");
        assert_eq!(warnings[0].source_map.len(), 2);
        assert_eq!(warnings[0].source_map[1].end, RawPosition::new(22, 75));
        assert_eq!(warnings[1].code, "6");
        assert_eq!(warnings[1].description, "no value(s) specified");
    }

    #[test]
    fn test_missing_source_map_is_left_empty() {
        let value = json!({
            "element": "parseResult",
            "content": [{
                "element": "annotation",
                "attributes": { "code": { "element": "number", "content": 3 } },
                "content": "oops"
            }]
        });
        let ValidationOutcome::Warnings(warnings) = decode_parse_result(&value) else {
            panic!("Expected warnings");
        };
        assert!(warnings[0].source_map.is_empty());
    }

    #[test]
    fn test_other_elements_are_unrecognized() {
        let outcome = decode_parse_result(&json!({ "element": "category" }));
        assert!(matches!(
            outcome,
            ValidationOutcome::Unrecognized(msg) if msg.contains("'category'")
        ));

        let outcome = decode_parse_result(&json!([1, 2]));
        assert!(matches!(outcome, ValidationOutcome::Unrecognized(_)));
    }

    #[test]
    fn test_annotation_without_code_is_unrecognized() {
        let value = json!({
            "element": "parseResult",
            "content": [{ "element": "annotation", "content": "no code" }]
        });
        assert!(matches!(
            decode_parse_result(&value),
            ValidationOutcome::Unrecognized(_)
        ));
    }

    #[test]
    fn test_default_options_require_name() {
        assert!(ValidatorOptions::default().require_blueprint_name);
    }

    #[cfg(unix)]
    mod command {
        use super::*;
        use pretty_assertions::assert_eq;

        fn shell(script: &str) -> CommandValidator {
            CommandValidator::new("sh", vec!["-c".to_string(), script.to_string()], None)
        }

        #[test]
        fn test_empty_output_is_clean() {
            let outcome = shell("cat > /dev/null")
                .validate("# API", &ValidatorOptions::default())
                .unwrap();
            assert_eq!(outcome, ValidationOutcome::Clean);
        }

        #[test]
        fn test_reads_parse_result_from_stdout() {
            let validator = shell(
                r#"cat > /dev/null; printf '%s' '{"element":"parseResult","content":[{"element":"annotation","attributes":{"code":{"content":8}},"content":"x"}]}'"#,
            );
            let outcome = validator
                .validate("# API", &ValidatorOptions::default())
                .unwrap();
            assert!(matches!(outcome, ValidationOutcome::Warnings(w) if w[0].code == "8"));
        }

        #[test]
        fn test_nonzero_exit_without_output_is_an_error() {
            let err = shell("cat > /dev/null; echo boom >&2; exit 4")
                .validate("# API", &ValidatorOptions::default())
                .unwrap_err();
            assert!(matches!(err, LinterError::Validator(msg) if msg.contains("boom")));
        }

        #[test]
        fn test_non_json_output_is_unrecognized() {
            let outcome = shell("cat > /dev/null; echo 'hello'")
                .validate("# API", &ValidatorOptions::default())
                .unwrap();
            assert!(matches!(outcome, ValidationOutcome::Unrecognized(_)));
        }

        #[test]
        fn test_require_name_arg_is_appended() {
            // $0 is the first argument after the script
            let validator = CommandValidator::new(
                "sh",
                vec![
                    "-c".to_string(),
                    r#"cat > /dev/null; [ "$0" = "--require-name" ] || exit 1"#.to_string(),
                ],
                Some("--require-name".to_string()),
            );
            let outcome = validator
                .validate("# API", &ValidatorOptions::default())
                .unwrap();
            assert_eq!(outcome, ValidationOutcome::Clean);

            let err = validator
                .validate(
                    "# API",
                    &ValidatorOptions {
                        require_blueprint_name: false,
                    },
                )
                .unwrap_err();
            assert!(matches!(err, LinterError::Validator(_)));
        }

        #[test]
        fn test_missing_program_is_a_validator_error() {
            let validator = CommandValidator::new("apiblint-no-such-validator", vec![], None);
            let err = validator
                .validate("# API", &ValidatorOptions::default())
                .unwrap_err();
            assert!(matches!(err, LinterError::Validator(_)));
        }
    }
}
