//! Template storage and rendering
//!
//! This module provides:
//! - The embedded template set for each profile
//! - On-disk overrides for template development
//! - Rendering planned files with minijinja

pub mod render;
pub mod store;

pub use render::Renderer;
pub use store::{TemplateStore, TEMPLATE_DIR_ENV};
