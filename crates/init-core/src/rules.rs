//! Declarative decision rules and the engine that evaluates them
//!
//! A profile describes its questions as static [`RuleGroup`] tables. Each
//! [`Rule`] declares its prompt, how its default is derived, when it is
//! implied without prompting, and which dependencies each answer pulls in.
//! The engine walks the tables in declaration order and produces a
//! [`Collected`] value; it holds no per-profile conditionals of its own.

use crate::answers::{AnswerRecord, AnswerValue};
use crate::dependencies::DependencySet;
use crate::error::{Result, ScaffoldError};
use crate::prompt::{ConfirmRequest, Prompter, SelectRequest};
use tracing::debug;

/// A constant answer value usable in static rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Choice(&'static str),
}

impl Literal {
    pub fn to_value(self) -> AnswerValue {
        match self {
            Literal::Bool(b) => AnswerValue::Bool(b),
            Literal::Choice(s) => AnswerValue::choice(s),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PromptKind {
    /// Candidates are listed with the inert choice first
    Select { candidates: &'static [&'static str] },
    Confirm,
}

#[derive(Debug, Clone, Copy)]
pub enum DefaultRule {
    Fixed(Literal),
    /// `true` iff the earlier answer `key` equals `value`
    Matches {
        key: &'static str,
        value: &'static str,
    },
}

/// Answer a rule without prompting when an earlier answer matches
#[derive(Debug, Clone, Copy)]
pub struct Implied {
    pub when_key: &'static str,
    pub equals: &'static str,
    pub value: Literal,
}

#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// The selected choice equals this value
    Choice(&'static str),
    /// The confirm was answered yes
    Confirmed,
    /// The selected choice is anything but this value
    Except(&'static str),
}

impl Trigger {
    fn fires(self, value: &AnswerValue) -> bool {
        match self {
            Trigger::Choice(expected) => value.as_choice() == Some(expected),
            Trigger::Confirmed => value.as_bool() == Some(true),
            Trigger::Except(excluded) => value.as_choice().is_some_and(|v| v != excluded),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    /// Prompt text; `{key}` placeholders are filled from earlier answers
    pub message: &'static str,
    pub kind: PromptKind,
    pub default: DefaultRule,
    pub implied: Option<Implied>,
    pub dependencies: &'static [(Trigger, &'static [&'static str])],
}

impl Rule {
    /// Value written when the rule's group is disabled
    pub fn inert(&self) -> AnswerValue {
        match self.kind {
            PromptKind::Select { candidates } => {
                AnswerValue::choice(candidates.first().copied().unwrap_or_default())
            }
            PromptKind::Confirm => AnswerValue::Bool(false),
        }
    }

    /// Dependencies pulled in by `value`, in table order
    pub fn dependencies_for<'a>(
        &'a self,
        value: &'a AnswerValue,
    ) -> impl Iterator<Item = &'static str> + 'a {
        self.dependencies
            .iter()
            .filter(move |&&(trigger, _)| trigger.fires(value))
            .flat_map(|&(_, names)| names.iter().copied())
    }

    fn resolve_default(&self, answers: &AnswerRecord) -> Result<AnswerValue> {
        match self.default {
            DefaultRule::Fixed(literal) => Ok(literal.to_value()),
            DefaultRule::Matches { key, value } => {
                Ok(AnswerValue::Bool(answers.get_choice(key)? == value))
            }
        }
    }

    fn implied_value(&self, answers: &AnswerRecord) -> Option<AnswerValue> {
        let implied = self.implied?;
        let current = answers.get_choice(implied.when_key).ok()?;
        (current == implied.equals).then(|| implied.value.to_value())
    }
}

/// An ordered group of rules.
///
/// When `disable_on` is set and the group's first rule resolves to that
/// choice, every later rule in the group is written with its inert value and
/// contributes no dependencies.
#[derive(Debug, Clone, Copy)]
pub struct RuleGroup {
    pub name: &'static str,
    pub disable_on: Option<&'static str>,
    pub rules: &'static [Rule],
}

/// Output of a question phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub answers: AnswerRecord,
    pub dependencies: DependencySet,
}

/// Evaluate `groups` in order on top of `seed`.
///
/// Any prompt failure aborts evaluation; the partially built value is
/// dropped with the error.
pub fn evaluate(
    seed: Collected,
    groups: &[RuleGroup],
    prompter: &mut dyn Prompter,
    force: bool,
) -> Result<Collected> {
    let Collected {
        mut answers,
        mut dependencies,
    } = seed;

    for group in groups {
        for (index, rule) in group.rules.iter().enumerate() {
            let value = ask(rule, &answers, prompter, force)?;
            debug!(group = group.name, key = rule.key, value = %value, force, "resolved rule");

            dependencies.append_all(rule.dependencies_for(&value));
            let disabled = index == 0
                && group
                    .disable_on
                    .is_some_and(|sentinel| value.as_choice() == Some(sentinel));
            answers = answers.with(rule.key, value);

            if disabled {
                debug!(group = group.name, "group disabled, writing inert answers");
                let inert: AnswerRecord = group.rules[1..]
                    .iter()
                    .map(|rest| (rest.key, rest.inert()))
                    .collect();
                answers = answers.merge(&inert);
                break;
            }
        }
    }

    Ok(Collected {
        answers,
        dependencies,
    })
}

fn ask(
    rule: &Rule,
    answers: &AnswerRecord,
    prompter: &mut dyn Prompter,
    force: bool,
) -> Result<AnswerValue> {
    if let Some(value) = rule.implied_value(answers) {
        return Ok(value);
    }

    let default = rule.resolve_default(answers)?;
    let message = fill_message(rule.message, answers);

    match rule.kind {
        PromptKind::Select { candidates } => {
            let default = default.as_choice().ok_or_else(|| ScaffoldError::AnswerType {
                key: rule.key.to_string(),
                expected: "choice",
            })?;
            let selected = prompter.select(&SelectRequest {
                key: rule.key,
                message: &message,
                candidates,
                default,
                force,
            })?;
            if !candidates.contains(&selected.as_str()) {
                return Err(ScaffoldError::InvalidChoice {
                    key: rule.key.to_string(),
                    value: selected,
                    candidates: candidates.iter().map(|c| c.to_string()).collect(),
                });
            }
            Ok(AnswerValue::Choice(selected))
        }
        PromptKind::Confirm => {
            let default = default.as_bool().ok_or_else(|| ScaffoldError::AnswerType {
                key: rule.key.to_string(),
                expected: "boolean",
            })?;
            let confirmed = prompter.confirm(&ConfirmRequest {
                key: rule.key,
                message: &message,
                default,
                force,
            })?;
            Ok(AnswerValue::Bool(confirmed))
        }
    }
}

fn fill_message(template: &str, answers: &AnswerRecord) -> String {
    if !template.contains('{') {
        return template.to_string();
    }
    answers.iter().fold(template.to_string(), |message, (key, value)| {
        message.replace(&format!("{{{}}}", key), &value.to_string())
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Prompter double that answers from a script and records what it was asked
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub answers: HashMap<String, AnswerValue>,
        /// Keys that reached an interactive step
        pub asked: Vec<String>,
        /// Keys resolved through `force`
        pub forced: Vec<String>,
        pub messages: HashMap<String, String>,
        pub defaults: HashMap<String, AnswerValue>,
    }

    impl ScriptedPrompter {
        pub fn with<const N: usize>(answers: [(&str, AnswerValue); N]) -> Self {
            Self {
                answers: answers
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
                ..Self::default()
            }
        }

        fn record(&mut self, key: &str, message: &str, default: AnswerValue, force: bool) {
            if force {
                self.forced.push(key.to_string());
            } else {
                self.asked.push(key.to_string());
            }
            self.messages.insert(key.to_string(), message.to_string());
            self.defaults.insert(key.to_string(), default);
        }

        pub fn was_prompted(&self, key: &str) -> bool {
            self.asked.iter().chain(&self.forced).any(|k| k == key)
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, request: &SelectRequest<'_>) -> Result<String> {
            self.record(
                request.key,
                request.message,
                AnswerValue::choice(request.default),
                request.force,
            );
            if request.force {
                return Ok(request.default.to_string());
            }
            Ok(match self.answers.get(request.key) {
                Some(AnswerValue::Choice(value)) => value.clone(),
                _ => request.default.to_string(),
            })
        }

        fn confirm(&mut self, request: &ConfirmRequest<'_>) -> Result<bool> {
            self.record(
                request.key,
                request.message,
                AnswerValue::Bool(request.default),
                request.force,
            );
            if request.force {
                return Ok(request.default);
            }
            Ok(match self.answers.get(request.key) {
                Some(AnswerValue::Bool(value)) => *value,
                _ => request.default,
            })
        }
    }

    /// Prompter that fails every request, as a cancelled terminal prompt would
    pub struct CancelledPrompter;

    impl Prompter for CancelledPrompter {
        fn select(&mut self, _request: &SelectRequest<'_>) -> Result<String> {
            Err(ScaffoldError::Prompt(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "cancelled",
            )))
        }

        fn confirm(&mut self, _request: &ConfirmRequest<'_>) -> Result<bool> {
            Err(ScaffoldError::Prompt(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "cancelled",
            )))
        }
    }
}
