//! Writing an emission plan to disk

use crate::error::{Result, ScaffoldError};
use crate::plan::EmissionPlan;
use crate::templates::Renderer;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Render every planned file and write it below `project_dir`.
///
/// All files are rendered before the first write, so a template error leaves
/// the directory untouched. Returns the destinations written, in plan order.
pub async fn emit_plan(
    plan: &EmissionPlan,
    renderer: &Renderer<'_>,
    project_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let rendered = plan
        .files
        .iter()
        .map(|file| renderer.render(file).map(|content| (file, content)))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(project_dir)
        .await
        .map_err(|e| ScaffoldError::io(project_dir, e))?;

    let mut written = Vec::with_capacity(rendered.len());
    for (file, content) in rendered {
        let target_path = project_dir.join(&file.destination);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::io(parent, e))?;
        }

        fs::write(&target_path, content)
            .await
            .map_err(|e| ScaffoldError::io(&target_path, e))?;
        info!(template = file.template, path = %target_path.display(), "emitted file");

        written.push(file.destination.clone());
    }

    Ok(written)
}
