//! Charm-style CLI prompts using cliclack

use crate::emit;
use crate::error::ScaffoldError;
use crate::install::PackageManager;
use crate::manifest;
use crate::plan::EmissionPlan;
use crate::profile::{Profile, ProfileKind};
use crate::prompt::{ConfirmRequest, PresetPrompter, Prompter, SelectRequest};
use crate::rules::Collected;
use crate::templates::{Renderer, TemplateStore, TEMPLATE_DIR_ENV};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the init command
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Profile name; prompted for when absent
    pub profile: Option<String>,

    /// Project directory to generate into
    pub directory: Option<PathBuf>,

    /// Answer every prompt with its default (non-interactive mode)
    pub force: bool,

    /// YAML file with preset answers
    pub answers: Option<PathBuf>,

    /// Local directory with template overrides
    pub template_dir: Option<PathBuf>,

    /// Record dependencies in package.json instead of installing them
    pub skip_install: bool,

    /// Package manager to install with; detected when absent
    pub package_manager: Option<PackageManager>,
}

/// Prompt adapter backed by cliclack
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

impl Prompter for CliclackPrompter {
    fn select(&mut self, request: &SelectRequest<'_>) -> crate::Result<String> {
        if request.force {
            remark(request.message, request.default)?;
            return Ok(request.default.to_string());
        }

        let initial = request
            .candidates
            .iter()
            .position(|c| *c == request.default)
            .unwrap_or(0);
        let mut select = cliclack::select(request.message).initial_value(initial);
        for (idx, candidate) in request.candidates.iter().enumerate() {
            select = select.item(idx, candidate, "");
        }

        let selected: usize = select.interact().map_err(ScaffoldError::Prompt)?;
        // An index past the candidates is reported as an invalid choice by the engine
        Ok(request
            .candidates
            .get(selected)
            .map(|c| c.to_string())
            .unwrap_or_else(|| selected.to_string()))
    }

    fn confirm(&mut self, request: &ConfirmRequest<'_>) -> crate::Result<bool> {
        if request.force {
            remark(request.message, if request.default { "Yes" } else { "No" })?;
            return Ok(request.default);
        }

        cliclack::confirm(request.message)
            .initial_value(request.default)
            .interact()
            .map_err(ScaffoldError::Prompt)
    }
}

fn remark(message: &str, answer: &str) -> crate::Result<()> {
    cliclack::log::remark(format!("{} {}", message, answer)).map_err(ScaffoldError::Prompt)
}

/// Run the CLI with interactive prompts
pub async fn run(args: InitArgs) -> Result<()> {
    cliclack::intro("webpack-init")?;

    // Step 1: Select profile
    let profile = select_profile(&args)?;

    // Step 2: Select directory
    let project_dir = select_directory(&args)?;

    // Step 3: Resolve the package manager before anything is written
    let package_manager = select_package_manager(&args, &project_dir)?;

    // Step 4: Ask the profile's questions
    let collected = collect_answers(profile, &args)?;

    // Step 5: Plan and write files
    let plan = profile.plan(&collected.answers)?;
    let store = load_templates(profile, &args)?;
    create_project(&plan, &store, &project_dir).await?;

    // Step 6: Manifest and dependencies
    install_dependencies(profile, &plan, &collected, &project_dir, package_manager, &args).await?;

    // Step 7: Show next steps
    print_next_steps(profile, &plan, &project_dir, package_manager)?;

    Ok(())
}

fn select_profile(args: &InitArgs) -> Result<&'static dyn Profile> {
    if let Some(name) = &args.profile {
        let kind = ProfileKind::from_name(name)?;
        cliclack::log::info(format!("Using profile: {}", kind))?;
        return Ok(kind.profile());
    }

    if args.force {
        let kind = ProfileKind::default();
        cliclack::log::info(format!("Using profile: {}", kind))?;
        return Ok(kind.profile());
    }

    let mut select = cliclack::select("Select a profile");
    for kind in ProfileKind::ALL {
        select = select.item(kind, kind.name(), kind.profile().description());
    }
    let kind: ProfileKind = select.interact()?;

    Ok(kind.profile())
}

fn select_directory(args: &InitArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.force {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --force
                let confirm = if args.force {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn collect_answers(profile: &dyn Profile, args: &InitArgs) -> Result<Collected> {
    let collected = match &args.answers {
        Some(path) => {
            cliclack::log::info(format!("Using answers from {}", path.display()))?;
            let mut prompter = PresetPrompter::load(path, CliclackPrompter)?;
            let collected = profile.questions(&mut prompter, args.force)?;
            for key in prompter.forced_overrides() {
                cliclack::log::remark(format!(
                    "{} taken from {} instead of its default",
                    key,
                    path.display()
                ))?;
            }
            collected
        }
        None => profile.questions(&mut CliclackPrompter, args.force)?,
    };

    if collected.dependencies.is_empty() {
        cliclack::log::info("No additional dependencies selected")?;
    } else {
        cliclack::log::success(format!(
            "Dependencies: {}",
            collected.dependencies.snapshot().join(", ")
        ))?;
    }

    Ok(collected)
}

fn load_templates(profile: &dyn Profile, args: &InitArgs) -> Result<TemplateStore> {
    let store = TemplateStore::embedded(profile.name());

    let override_dir = args
        .template_dir
        .clone()
        .or_else(|| std::env::var_os(TEMPLATE_DIR_ENV).map(PathBuf::from));

    match override_dir {
        Some(dir) => {
            cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
            Ok(store.with_overrides(&dir)?)
        }
        None => Ok(store),
    }
}

async fn create_project(plan: &EmissionPlan, store: &TemplateStore, project_dir: &Path) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let renderer = Renderer::new(store)?;
    let written = match emit::emit_plan(plan, &renderer, project_dir).await {
        Ok(written) => written,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e.into());
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        written.len(),
        project_dir.display()
    ));

    Ok(())
}

fn select_package_manager(args: &InitArgs, project_dir: &Path) -> Result<PackageManager> {
    let package_manager = match args.package_manager {
        Some(pm) => pm,
        None => PackageManager::detect(project_dir),
    };
    if !args.skip_install && !package_manager.is_available() {
        anyhow::bail!(
            "{} was not found in PATH. Install it or rerun with --skip-install.",
            package_manager
        );
    }
    Ok(package_manager)
}

async fn install_dependencies(
    profile: &dyn Profile,
    plan: &EmissionPlan,
    collected: &Collected,
    project_dir: &Path,
    package_manager: PackageManager,
    args: &InitArgs,
) -> Result<()> {
    let packages = manifest::install_list(profile.base_dependencies(), &collected.dependencies);

    if args.skip_install {
        manifest::update_package_json(project_dir, &plan.manifest, &packages).await?;
        cliclack::log::info(format!(
            "Skipped installation. Recorded {} packages in package.json",
            packages.len()
        ))?;
        return Ok(());
    }

    manifest::update_package_json(project_dir, &plan.manifest, &[]).await?;
    cliclack::log::info(format!(
        "Installing {} packages with {}",
        packages.len(),
        package_manager
    ))?;

    package_manager.install(project_dir, &packages).await?;
    cliclack::log::success("Dependencies installed")?;

    Ok(())
}

fn print_next_steps(
    profile: &dyn Profile,
    plan: &EmissionPlan,
    project_dir: &Path,
    package_manager: PackageManager,
) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();
    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }
    steps.extend(profile.next_steps(plan, &package_manager.run_prefix()));

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}  {}", console::style(format!("{}.", i + 1)).dim(), step);
    }

    if let Some(config) = &plan.config_path {
        println!();
        println!(
            "  Bundler configuration written to {}",
            console::style(config.display()).cyan()
        );
    }

    cliclack::outro("Happy bundling!")?;

    Ok(())
}
