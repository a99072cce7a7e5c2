//! Embedded templates with optional on-disk overrides

use crate::error::{Result, ScaffoldError};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Environment variable pointing at a local template directory
pub const TEMPLATE_DIR_ENV: &str = "WEBPACK_INIT_TEMPLATE_DIR";

const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("index.js", include_str!("../../templates/default/index.js")),
    ("README.md", include_str!("../../templates/default/README.md")),
    (
        "template.html",
        include_str!("../../templates/default/template.html"),
    ),
    (
        "webpack.config.js",
        include_str!("../../templates/default/webpack.config.js"),
    ),
    (".babelrc", include_str!("../../templates/default/.babelrc")),
    (
        "tsconfig.json",
        include_str!("../../templates/default/tsconfig.json"),
    ),
    (
        "postcss.config.js",
        include_str!("../../templates/default/postcss.config.js"),
    ),
];

fn embedded(profile: &str) -> &'static [(&'static str, &'static str)] {
    match profile {
        "default" => DEFAULT_TEMPLATES,
        _ => &[],
    }
}

/// Template sources for one profile, keyed by template name
#[derive(Debug, Clone)]
pub struct TemplateStore {
    profile: String,
    templates: BTreeMap<String, Cow<'static, str>>,
}

impl TemplateStore {
    /// Templates compiled into the binary
    pub fn embedded(profile: &str) -> Self {
        let templates = embedded(profile)
            .iter()
            .map(|(name, source)| (name.to_string(), Cow::Borrowed(*source)))
            .collect();
        Self {
            profile: profile.to_string(),
            templates,
        }
    }

    /// Replace or add templates from `<dir>/<profile>/`.
    ///
    /// Template names are paths relative to the profile directory, with `/`
    /// separators.
    pub fn with_overrides(mut self, dir: &Path) -> Result<Self> {
        let root = dir.join(&self.profile);
        if !root.is_dir() {
            return Err(ScaffoldError::io(
                &root,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "template directory not found",
                ),
            ));
        }

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                ScaffoldError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let source = std::fs::read_to_string(entry.path())
                .map_err(|e| ScaffoldError::io(entry.path(), e))?;

            debug!(template = %relative, path = %entry.path().display(), "template override");
            self.templates.insert(relative, Cow::Owned(source));
        }

        Ok(self)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.templates
            .get(name)
            .map(|source| source.as_ref())
            .ok_or_else(|| ScaffoldError::template(name, "not found in template set"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|(name, source)| (name.as_str(), source.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_templates_embedded() {
        let store = TemplateStore::embedded("default");
        for name in [
            "index.js",
            "README.md",
            "template.html",
            "webpack.config.js",
            ".babelrc",
            "tsconfig.json",
            "postcss.config.js",
        ] {
            assert!(store.get(name).is_ok(), "missing template {}", name);
        }
    }

    #[test]
    fn test_react_has_no_templates() {
        assert!(TemplateStore::embedded("react").is_empty());
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let store = TemplateStore::embedded("default");
        assert!(matches!(
            store.get("vite.config.js"),
            Err(ScaffoldError::Template { .. })
        ));
    }

    #[test]
    fn test_overrides_replace_and_add() {
        let dir = tempfile::tempdir().unwrap();
        let profile_dir = dir.path().join("default");
        std::fs::create_dir_all(profile_dir.join("src")).unwrap();
        std::fs::write(profile_dir.join("index.js"), "console.log('custom');\n").unwrap();
        std::fs::write(profile_dir.join("src/extra.js"), "export {};\n").unwrap();

        let store = TemplateStore::embedded("default")
            .with_overrides(dir.path())
            .unwrap();

        assert_eq!(store.get("index.js").unwrap(), "console.log('custom');\n");
        assert_eq!(store.get("src/extra.js").unwrap(), "export {};\n");
        assert!(store.get("tsconfig.json").is_ok());
    }

    #[test]
    fn test_missing_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateStore::embedded("default").with_overrides(dir.path());
        assert!(matches!(result, Err(ScaffoldError::Io { .. })));
    }
}
