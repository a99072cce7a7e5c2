//! Rendering planned files with minijinja

use super::store::TemplateStore;
use crate::error::{Result, ScaffoldError};
use crate::plan::PlannedFile;
use minijinja::{AutoEscape, Environment};

/// Template environment built from a [`TemplateStore`]
pub struct Renderer<'s> {
    env: Environment<'s>,
}

impl<'s> Renderer<'s> {
    pub fn new(store: &'s TemplateStore) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // Generated files are source code, not markup
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, source) in store.iter() {
            env.add_template(name, source)
                .map_err(|e| ScaffoldError::template(name, e))?;
        }

        Ok(Self { env })
    }

    pub fn render(&self, file: &PlannedFile) -> Result<String> {
        let template = self
            .env
            .get_template(file.template)
            .map_err(|e| ScaffoldError::template(file.template, e))?;

        template
            .render(&file.context)
            .map_err(|e| ScaffoldError::template(file.template, e))
    }
}
