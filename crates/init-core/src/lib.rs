//! Init Core - decision rules and file generation for webpack project scaffolding
//!
//! This library turns a short sequence of technology choices (language,
//! styling, dev server, PWA support) into two artifacts: an ordered list of
//! packages to install and an answer record used to render configuration
//! files.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Decision Core** - Declarative rule tables (`rules`), the answer
//!   record (`answers`) and the dependency set (`dependencies`). Pure, no IO.
//! - **Layer 2: Profiles and Planning** - The `Profile` trait, its registry and
//!   the emission planner (`plan`). Still pure: a plan is a function of the
//!   answer record.
//! - **Layer 3: Collaborators** - Template rendering, file emission,
//!   `package.json` merging and package installation.
//! - **Layer 4: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt adapter and interactive flow
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use init_core::{ProfileKind, DefaultsPrompter, TemplateStore, Renderer};
//!
//! let profile = ProfileKind::from_name("default")?.profile();
//! let collected = profile.questions(&mut DefaultsPrompter, true)?;
//! let plan = profile.plan(&collected.answers)?;
//!
//! let store = TemplateStore::embedded(profile.name());
//! let renderer = Renderer::new(&store)?;
//! init_core::emit::emit_plan(&plan, &renderer, "my-app".as_ref()).await?;
//! ```

pub mod answers;
pub mod dependencies;
pub mod emit;
pub mod error;
pub mod install;
pub mod manifest;
pub mod plan;
pub mod profile;
pub mod prompt;
pub mod rules;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerRecord, AnswerValue};
pub use dependencies::DependencySet;
pub use error::{Result, ScaffoldError};
pub use install::PackageManager;
pub use plan::{EmissionPlan, PlannedFile};
pub use profile::{Profile, ProfileKind};
pub use prompt::{DefaultsPrompter, PresetPrompter, Prompter};
pub use rules::Collected;
pub use templates::{Renderer, TemplateStore};

#[cfg(feature = "tui")]
pub use tui::run;
