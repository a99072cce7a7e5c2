//! Profile trait and registry
//!
//! A profile turns prompts into answers and dependencies (`questions`), then
//! turns the final answers into an emission plan (`plan`). Profiles are
//! stateless: the question phase returns a [`Collected`] value and the plan
//! phase only reads the answer record it is given.

mod default;
mod react;

pub use default::WebpackProfile;
pub use react::ReactProfile;

use crate::answers::AnswerRecord;
use crate::error::{Result, ScaffoldError};
use crate::plan::EmissionPlan;
use crate::prompt::Prompter;
use crate::rules::Collected;
use std::fmt;

/// Packages installed for every profile, ahead of the collected ones
pub const BASE_DEPENDENCIES: &[&str] = &["webpack", "webpack-cli"];

/// Capability interface implemented by each technology profile
///
/// Each profile defines:
/// - Identity (name, description)
/// - Its decision rules, run by `questions`
/// - Its emission planner, run by `plan`
/// - Post-generation instructions
pub trait Profile: Send + Sync {
    /// Registry name, as typed on the command line
    fn name(&self) -> &'static str;

    /// One-line description shown in profile pickers and listings
    fn description(&self) -> &'static str;

    /// Packages every project of this profile needs regardless of answers
    fn base_dependencies(&self) -> &'static [&'static str] {
        BASE_DEPENDENCIES
    }

    /// Run the profile's decision rules
    fn questions(&self, prompter: &mut dyn Prompter, force: bool) -> Result<Collected>;

    /// Compute the emission plan. Must be a pure function of `answers`.
    fn plan(&self, answers: &AnswerRecord) -> Result<EmissionPlan>;

    /// Instructions printed once the project is generated.
    /// `run` is the package manager's script runner, e.g. `npm run`.
    ///
    /// A plan without files has nothing to build yet; only the entry module
    /// is suggested.
    fn next_steps(&self, plan: &EmissionPlan, run: &str) -> Vec<String> {
        if plan.files.is_empty() {
            return vec![format!("create your entry module at {}", plan.entry)];
        }

        let mut steps = vec![format!("{} build", run)];
        if plan.manifest["scripts"].get("serve").is_some() {
            steps.push(format!("{} serve", run));
        }
        steps
    }
}

static WEBPACK: WebpackProfile = WebpackProfile;
static REACT: ReactProfile = ReactProfile;

/// Closed set of registered profiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    #[default]
    Default,
    React,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 2] = [ProfileKind::Default, ProfileKind::React];

    pub fn name(self) -> &'static str {
        self.profile().name()
    }

    pub fn profile(self) -> &'static dyn Profile {
        match self {
            ProfileKind::Default => &WEBPACK,
            ProfileKind::React => &REACT,
        }
    }

    /// Look up a profile by registry name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScaffoldError::UnknownProfile {
                name: name.to_string(),
                available: Self::ALL.iter().map(|k| k.name()).collect(),
            })
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
