//! Package manager detection and dependency installation

use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] =
        [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    pub fn binary(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    fn lock_file(self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
        }
    }

    fn install_args(self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm => &["install", "-D"],
            PackageManager::Yarn | PackageManager::Pnpm => &["add", "-D"],
        }
    }

    /// Script runner prefix, e.g. `npm run`
    pub fn run_prefix(self) -> String {
        format!("{} run", self.binary())
    }

    /// Parse a package manager name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.binary().eq_ignore_ascii_case(name))
    }

    /// Check if the package manager is available in PATH
    pub fn is_available(self) -> bool {
        Command::new(self.binary())
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    /// Choose a package manager for `project_dir`.
    ///
    /// A lock file in the project wins, then an installed yarn or pnpm, then npm.
    pub fn detect(project_dir: &Path) -> Self {
        Self::from_lock_file(project_dir).unwrap_or_else(|| {
            [PackageManager::Yarn, PackageManager::Pnpm]
                .into_iter()
                .find(|pm| pm.is_available())
                .unwrap_or(PackageManager::Npm)
        })
    }

    fn from_lock_file(project_dir: &Path) -> Option<Self> {
        [PackageManager::Yarn, PackageManager::Pnpm, PackageManager::Npm]
            .into_iter()
            .find(|pm| project_dir.join(pm.lock_file()).exists())
    }

    /// Human-readable install command
    pub fn command_line(self, packages: &[String]) -> String {
        let mut parts = vec![self.binary().to_string()];
        parts.extend(self.install_args().iter().map(|a| a.to_string()));
        parts.extend(packages.iter().cloned());
        parts.join(" ")
    }

    /// Install `packages` as dev dependencies, streaming the manager's output
    pub async fn install(self, project_dir: &Path, packages: &[String]) -> Result<()> {
        let cmd = self.command_line(packages);
        if packages.is_empty() {
            debug!("nothing to install");
            return Ok(());
        }

        println!();
        println!("{} {}", "Running:".dimmed(), cmd.yellow());
        println!();

        let failed = |message: String| ScaffoldError::Install {
            command: cmd.clone(),
            message,
        };

        let mut child = TokioCommand::new(self.binary())
            .args(self.install_args())
            .args(packages)
            .current_dir(project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| failed("failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| failed("failed to capture stderr".to_string()))?;

        tokio::join!(stream_lines(stdout, false), stream_lines(stderr, true));

        let status = child.wait().await.map_err(|e| failed(e.to_string()))?;
        println!();

        if status.success() {
            info!(manager = self.binary(), packages = packages.len(), "installed dependencies");
            Ok(())
        } else {
            Err(failed(format!(
                "exited with code {}",
                status.code().unwrap_or(-1)
            )))
        }
    }
}

async fn stream_lines<R: AsyncRead + Unpin>(reader: R, is_stderr: bool) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if is_stderr => eprintln!("  {}", line.yellow()),
            Ok(Some(line)) => println!("  {}", line),
            Ok(None) => break,
            Err(e) => {
                eprintln!("{} {}", "Error reading output:".red(), e);
                break;
            }
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_file_detection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Pnpm);
    }

    #[test]
    fn test_yarn_lock_wins_over_npm_lock() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package-lock.json"), "{}").unwrap();
        std::fs::write(dir.path().join("yarn.lock"), "").unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Yarn);
    }

    #[test]
    fn test_command_line() {
        let packages = vec!["webpack".to_string(), "sass".to_string()];
        assert_eq!(
            PackageManager::Npm.command_line(&packages),
            "npm install -D webpack sass"
        );
        assert_eq!(
            PackageManager::Yarn.command_line(&packages),
            "yarn add -D webpack sass"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(PackageManager::parse("PNPM"), Some(PackageManager::Pnpm));
        assert_eq!(PackageManager::parse("bun"), None);
    }

    #[tokio::test]
    async fn test_empty_install_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        PackageManager::Npm.install(dir.path(), &[]).await.unwrap();
    }
}
