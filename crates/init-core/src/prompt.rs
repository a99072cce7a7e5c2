//! Prompt adapter interface
//!
//! The rule engine never talks to a terminal directly. It hands a request to a
//! [`Prompter`] and validates what comes back. Implementations must honor
//! `force` by returning the request's default without any interaction.

use crate::answers::{AnswerRecord, AnswerValue};
use crate::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};

/// A single-select prompt
#[derive(Debug, Clone)]
pub struct SelectRequest<'a> {
    pub key: &'a str,
    pub message: &'a str,
    pub candidates: &'a [&'static str],
    pub default: &'a str,
    pub force: bool,
}

/// A yes/no prompt
#[derive(Debug, Clone)]
pub struct ConfirmRequest<'a> {
    pub key: &'a str,
    pub message: &'a str,
    pub default: bool,
    pub force: bool,
}

pub trait Prompter {
    fn select(&mut self, request: &SelectRequest<'_>) -> Result<String>;

    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<bool>;
}

/// Non-interactive adapter that always answers with the declared default
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn select(&mut self, request: &SelectRequest<'_>) -> Result<String> {
        Ok(request.default.to_string())
    }

    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<bool> {
        Ok(request.default)
    }
}

/// Answers prompts from a preset answers file, delegating the rest.
///
/// Preset answers take precedence over `force`: a key written in the file is
/// used even in non-interactive runs. Keys answered that way are listed by
/// [`PresetPrompter::forced_overrides`].
pub struct PresetPrompter<P> {
    path: PathBuf,
    preset: AnswerRecord,
    inner: P,
    overridden: Vec<String>,
}

impl<P: Prompter> PresetPrompter<P> {
    pub fn new(path: impl Into<PathBuf>, preset: AnswerRecord, inner: P) -> Self {
        Self {
            path: path.into(),
            preset,
            inner,
            overridden: Vec::new(),
        }
    }

    /// Keys whose preset answer replaced a forced default
    pub fn forced_overrides(&self) -> &[String] {
        &self.overridden
    }

    fn note_override(&mut self, key: &str, force: bool) {
        if force {
            tracing::info!(key, "preset answer overrides forced default");
            self.overridden.push(key.to_string());
        }
    }

    /// Load a YAML map of answer key to boolean or string
    pub fn load(path: &Path, inner: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        let preset: AnswerRecord =
            serde_yaml::from_str(&content).map_err(|e| ScaffoldError::AnswersFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), answers = preset.len(), "loaded preset answers");
        Ok(Self::new(path, preset, inner))
    }

    fn mismatch(&self, key: &str, expected: &str, found: &AnswerValue) -> ScaffoldError {
        ScaffoldError::AnswersFile {
            path: self.path.clone(),
            message: format!("'{}' must be a {}, found '{}'", key, expected, found),
        }
    }
}

impl<P: Prompter> Prompter for PresetPrompter<P> {
    fn select(&mut self, request: &SelectRequest<'_>) -> Result<String> {
        match self.preset.get(request.key) {
            Ok(AnswerValue::Choice(value)) => {
                let value = value.clone();
                self.note_override(request.key, request.force);
                Ok(value)
            }
            Ok(other) => Err(self.mismatch(request.key, "string", other)),
            Err(_) => self.inner.select(request),
        }
    }

    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<bool> {
        match self.preset.get(request.key) {
            Ok(AnswerValue::Bool(value)) => {
                let value = *value;
                self.note_override(request.key, request.force);
                Ok(value)
            }
            Ok(other) => Err(self.mismatch(request.key, "boolean", other)),
            Err(_) => self.inner.confirm(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn confirm_request(key: &str) -> ConfirmRequest<'_> {
        ConfirmRequest {
            key,
            message: "?",
            default: true,
            force: true,
        }
    }

    #[test]
    fn test_defaults_prompter_returns_defaults() {
        let mut prompter = DefaultsPrompter;
        let request = SelectRequest {
            key: "langType",
            message: "?",
            candidates: &["none", "ES6"],
            default: "ES6",
            force: false,
        };
        assert_eq!(prompter.select(&request).unwrap(), "ES6");
        assert!(prompter.confirm(&confirm_request("devServer")).unwrap());
    }

    #[test]
    fn test_preset_overrides_and_delegates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "devServer: false\ncssType: SASS").unwrap();

        let mut prompter = PresetPrompter::load(file.path(), DefaultsPrompter).unwrap();

        assert!(!prompter.confirm(&confirm_request("devServer")).unwrap());
        // Not in the file: falls through to the defaults
        assert!(prompter.confirm(&confirm_request("htmlWebpackPlugin")).unwrap());
    }

    #[test]
    fn test_preset_wins_over_force_and_is_reported() {
        let preset = AnswerRecord::new().with("cssType", "SASS");
        let mut prompter = PresetPrompter::new("answers.yaml", preset, DefaultsPrompter);
        let request = SelectRequest {
            key: "cssType",
            message: "?",
            candidates: &["none", "SASS"],
            default: "none",
            force: true,
        };

        assert_eq!(prompter.select(&request).unwrap(), "SASS");
        assert!(prompter.confirm(&confirm_request("devServer")).unwrap());
        assert_eq!(prompter.forced_overrides(), ["cssType"]);
    }

    #[test]
    fn test_interactive_preset_is_not_an_override() {
        let preset = AnswerRecord::new().with("devServer", false);
        let mut prompter = PresetPrompter::new("answers.yaml", preset, DefaultsPrompter);
        let request = ConfirmRequest {
            force: false,
            ..confirm_request("devServer")
        };

        assert!(!prompter.confirm(&request).unwrap());
        assert!(prompter.forced_overrides().is_empty());
    }

    #[test]
    fn test_preset_type_mismatch() {
        let preset = AnswerRecord::new().with("devServer", "yes");
        let mut prompter = PresetPrompter::new("answers.yaml", preset, DefaultsPrompter);

        let err = prompter.confirm(&confirm_request("devServer")).unwrap_err();
        assert!(matches!(err, ScaffoldError::AnswersFile { .. }));
    }

    #[test]
    fn test_malformed_answers_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- not\n- a map").unwrap();

        let result = PresetPrompter::load(file.path(), DefaultsPrompter);
        assert!(matches!(result, Err(ScaffoldError::AnswersFile { .. })));
    }
}
