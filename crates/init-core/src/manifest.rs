//! `package.json` merging

use crate::dependencies::DependencySet;
use crate::error::{Result, ScaffoldError};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

pub const PACKAGE_JSON: &str = "package.json";

/// Version tag recorded for dependencies that were not installed
const UNPINNED: &str = "latest";

/// Merge `patch` into `target`. Objects merge key by key, recursively; any
/// other value in `patch` replaces the one in `target`.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                deep_merge(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

/// Base packages followed by the collected set, first occurrence wins
pub fn install_list(base: &[&str], dependencies: &DependencySet) -> Vec<String> {
    let mut seen = HashSet::new();
    base.iter()
        .copied()
        .chain(dependencies.snapshot().iter().map(String::as_str))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Add `names` under `devDependencies`, leaving existing entries alone
pub fn add_dev_dependencies(manifest: &mut Value, names: &[String]) {
    if !manifest.is_object() {
        *manifest = Value::Object(Map::new());
    }
    let Some(root) = manifest.as_object_mut() else {
        return;
    };
    let dev = root
        .entry("devDependencies")
        .or_insert_with(|| Value::Object(Map::new()));
    if !dev.is_object() {
        *dev = Value::Object(Map::new());
    }
    if let Some(dev) = dev.as_object_mut() {
        for name in names {
            dev.entry(name.clone())
                .or_insert_with(|| Value::String(UNPINNED.to_string()));
        }
    }
}

/// Apply the plan's manifest patch (and optionally record dev dependencies)
/// to `<project_dir>/package.json`, creating it when absent.
pub async fn update_package_json(
    project_dir: &Path,
    patch: &Value,
    dev_dependencies: &[String],
) -> Result<PathBuf> {
    let path = project_dir.join(PACKAGE_JSON);

    let mut manifest = match fs::read_to_string(&path).await {
        Ok(content) => serde_json::from_str(&content).map_err(|source| ScaffoldError::Manifest {
            path: path.clone(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Value::Object(Map::new()),
        Err(e) => return Err(ScaffoldError::io(&path, e)),
    };

    deep_merge(&mut manifest, patch);
    if !dev_dependencies.is_empty() {
        add_dev_dependencies(&mut manifest, dev_dependencies);
    }

    let mut content = serde_json::to_string_pretty(&manifest).map_err(|source| {
        ScaffoldError::Manifest {
            path: path.clone(),
            source,
        }
    })?;
    content.push('\n');

    fs::write(&path, content)
        .await
        .map_err(|e| ScaffoldError::io(&path, e))?;
    info!(path = %path.display(), recorded = dev_dependencies.len(), "updated manifest");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deep_merge_keeps_existing_keys() {
        let mut manifest = json!({
            "name": "existing",
            "scripts": {"test": "jest"},
            "private": true,
        });
        deep_merge(
            &mut manifest,
            &json!({"name": "my-webpack-project", "scripts": {"build": "webpack"}}),
        );

        assert_eq!(
            manifest,
            json!({
                "name": "my-webpack-project",
                "scripts": {"test": "jest", "build": "webpack"},
                "private": true,
            })
        );
    }

    #[test]
    fn test_install_list_dedups_in_order() {
        let mut deps = DependencySet::new();
        deps.append_all(["webpack-dev-server", "webpack", "ts-loader", "webpack-dev-server"]);

        assert_eq!(
            install_list(&["webpack", "webpack-cli"], &deps),
            vec!["webpack", "webpack-cli", "webpack-dev-server", "ts-loader"]
        );
    }

    #[test]
    fn test_dev_dependencies_do_not_overwrite() {
        let mut manifest = json!({"devDependencies": {"webpack": "^5.0.0"}});
        add_dev_dependencies(
            &mut manifest,
            &["webpack".to_string(), "sass".to_string()],
        );

        assert_eq!(
            manifest["devDependencies"],
            json!({"webpack": "^5.0.0", "sass": "latest"})
        );
    }

    #[tokio::test]
    async fn test_update_creates_package_json() {
        let dir = tempfile::tempdir().unwrap();
        let patch = crate::plan::manifest_patch(true);

        let path = update_package_json(dir.path(), &patch, &["webpack".to_string()])
            .await
            .unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["scripts"]["serve"], "webpack serve");
        assert_eq!(written["devDependencies"]["webpack"], "latest");
    }

    #[tokio::test]
    async fn test_update_keeps_existing_key_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PACKAGE_JSON),
            r#"{"name": "app", "version": "1.0.0", "private": true, "dependencies": {}}"#,
        )
        .unwrap();

        update_package_json(dir.path(), &json!({"scripts": {"build": "webpack"}}), &[])
            .await
            .unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(PACKAGE_JSON)).unwrap())
                .unwrap();
        let keys: Vec<&str> = written
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["name", "version", "private", "dependencies", "scripts"]);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PACKAGE_JSON), "{ not json").unwrap();

        let result = update_package_json(dir.path(), &json!({}), &[]).await;
        assert!(matches!(result, Err(ScaffoldError::Manifest { .. })));
    }
}
