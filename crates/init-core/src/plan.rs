//! Emission plan: what to render, where, and with which context

use crate::answers::AnswerRecord;
use crate::error::Result;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Render context handed to a template: the answer record plus planner extras
pub type RenderContext = AnswerRecord;

/// One file to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    /// Template name inside the profile's template set
    pub template: &'static str,
    /// Destination relative to the project directory
    pub destination: PathBuf,
    pub context: RenderContext,
}

impl PlannedFile {
    pub fn new(template: &'static str, destination: impl Into<PathBuf>) -> Self {
        Self {
            template,
            destination: destination.into(),
            context: RenderContext::new(),
        }
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }
}

/// Everything the emission step needs, computed from the answer record alone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionPlan {
    pub profile: &'static str,
    /// Bundler entry as written into the config (e.g. `./src/index.ts`)
    pub entry: String,
    /// Generated bundler configuration, when the profile writes one
    pub config_path: Option<PathBuf>,
    pub files: Vec<PlannedFile>,
    /// Fields deep-merged into `package.json`
    pub manifest: Value,
}

impl EmissionPlan {
    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.destination.as_path())
    }
}

pub const LANG_TYPE: &str = "langType";
pub const DEV_SERVER: &str = "devServer";

#[derive(Debug, Clone, Copy)]
pub enum Destination {
    Fixed(&'static str),
    /// The entry file, whose extension depends on the language answer
    Entry,
}

#[derive(Debug, Clone, Copy)]
pub enum ContextKind {
    Empty,
    Answers,
    /// Answers plus the `entry` path
    AnswersWithEntry,
}

/// Predicate deciding whether a template is emitted
#[derive(Debug, Clone, Copy)]
pub enum When {
    Always,
    ChoiceIs {
        key: &'static str,
        value: &'static str,
    },
    Confirmed(&'static str),
}

/// One row of a profile's emission table
#[derive(Debug, Clone, Copy)]
pub struct Emission {
    pub template: &'static str,
    pub destination: Destination,
    pub context: ContextKind,
    pub when: When,
}

/// Evaluate an emission table against the final answers
pub fn plan_files(
    emissions: &[Emission],
    answers: &AnswerRecord,
    entry: &str,
) -> Result<Vec<PlannedFile>> {
    let mut files = Vec::new();
    for emission in emissions {
        let included = match emission.when {
            When::Always => true,
            When::ChoiceIs { key, value } => answers.get_choice(key)? == value,
            When::Confirmed(key) => answers.get_bool(key)?,
        };
        if !included {
            continue;
        }

        let destination = match emission.destination {
            Destination::Fixed(path) => path,
            Destination::Entry => entry.trim_start_matches("./"),
        };
        let context = match emission.context {
            ContextKind::Empty => RenderContext::new(),
            ContextKind::Answers => answers.clone(),
            ContextKind::AnswersWithEntry => answers.with("entry", entry),
        };
        files.push(PlannedFile::new(emission.template, destination).with_context(context));
    }
    Ok(files)
}

/// Fail with `UnknownAnswerKey` unless every key was recorded
pub fn require_keys(answers: &AnswerRecord, keys: &[&str]) -> Result<()> {
    for key in keys {
        answers.get(key)?;
    }
    Ok(())
}

/// Entry file chosen by the language answer
pub fn entry_path(answers: &AnswerRecord) -> Result<String> {
    let extension = match answers.get_choice(LANG_TYPE)? {
        "Typescript" => "ts",
        _ => "js",
    };
    Ok(format!("./src/index.{}", extension))
}

/// `package.json` fields written for every generated project
pub fn manifest_patch(dev_server: bool) -> Value {
    let mut scripts = Map::new();
    scripts.insert(
        "build".to_string(),
        json!("webpack --mode=production --node-env=production"),
    );
    scripts.insert("build:dev".to_string(), json!("webpack --mode=development"));
    scripts.insert(
        "build:prod".to_string(),
        json!("webpack --mode=production --node-env=production"),
    );
    scripts.insert("watch".to_string(), json!("webpack --watch"));
    if dev_server {
        scripts.insert("serve".to_string(), json!("webpack serve"));
    }

    json!({
        "version": "1.0.0",
        "description": "My webpack project",
        "name": "my-webpack-project",
        "scripts": scripts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_follows_language() {
        let ts = AnswerRecord::new().with(LANG_TYPE, "Typescript");
        let es6 = AnswerRecord::new().with(LANG_TYPE, "ES6");
        assert_eq!(entry_path(&ts).unwrap(), "./src/index.ts");
        assert_eq!(entry_path(&es6).unwrap(), "./src/index.js");
    }

    #[test]
    fn test_entry_requires_language() {
        assert!(entry_path(&AnswerRecord::new()).is_err());
    }

    #[test]
    fn test_plan_files_applies_predicates() {
        const TABLE: &[Emission] = &[
            Emission {
                template: "index.js",
                destination: Destination::Entry,
                context: ContextKind::Empty,
                when: When::Always,
            },
            Emission {
                template: "tsconfig.json",
                destination: Destination::Fixed("tsconfig.json"),
                context: ContextKind::Empty,
                when: When::ChoiceIs {
                    key: LANG_TYPE,
                    value: "Typescript",
                },
            },
            Emission {
                template: "postcss.config.js",
                destination: Destination::Fixed("postcss.config.js"),
                context: ContextKind::AnswersWithEntry,
                when: When::Confirmed("isPostCSS"),
            },
        ];
        let answers = AnswerRecord::new()
            .with(LANG_TYPE, "ES6")
            .with("isPostCSS", true);

        let files = plan_files(TABLE, &answers, "./src/index.js").unwrap();

        let destinations: Vec<_> = files.iter().map(|f| f.destination.clone()).collect();
        assert_eq!(
            destinations,
            vec![PathBuf::from("src/index.js"), PathBuf::from("postcss.config.js")]
        );
        assert!(files[0].context.is_empty());
        assert_eq!(files[1].context.get_choice("entry").unwrap(), "./src/index.js");
    }

    #[test]
    fn test_plan_files_reports_missing_predicate_key() {
        const TABLE: &[Emission] = &[Emission {
            template: "postcss.config.js",
            destination: Destination::Fixed("postcss.config.js"),
            context: ContextKind::Empty,
            when: When::Confirmed("isPostCSS"),
        }];
        let err = plan_files(TABLE, &AnswerRecord::new(), "./src/index.js").unwrap_err();
        assert!(matches!(err, crate::ScaffoldError::UnknownAnswerKey { .. }));
    }

    #[test]
    fn test_serve_script_only_with_dev_server() {
        assert_eq!(manifest_patch(true)["scripts"]["serve"], "webpack serve");
        assert!(manifest_patch(false)["scripts"].get("serve").is_none());
    }
}
