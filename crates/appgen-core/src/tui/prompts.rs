//! Charm-style CLI prompts using cliclack

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::manifest::{self, ManifestProps};
use crate::scaffold::{self, plan_for, ArtifactKind, GenerationPlan, GenerationRequest, Overwrite};
use crate::version::{self, GateOutcome, VersionSource};

/// CLI arguments for a generation run
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Artifact type, pre-answering the select prompt
    pub kind: Option<ArtifactKind>,

    /// Artifact name, pre-answering the input prompt
    pub name: Option<String>,

    /// Destination project directory
    pub directory: Option<PathBuf>,

    /// Local directory to read templates from instead of the shipped set
    pub template_dir: Option<PathBuf>,

    /// Allow single-file renders to replace existing destinations
    pub force: bool,

    /// Skip the registry version check
    pub skip_version_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the generator with interactive prompts.
///
/// Stage order matches the pipeline contract: the version gate first (nothing
/// is written when it blocks), then initialization from the destination
/// manifest, then prompts, then the write.
pub async fn run<S: VersionSource>(source: &S, args: CreateArgs, local_version: &str) -> Result<()> {
    cliclack::intro("appgen")?;

    if args.skip_version_check {
        cliclack::log::info("Skipping generator version check")?;
    } else {
        check_generator_version(source, local_version).await?;
    }

    let project_dir = select_directory(&args)?;

    // Initialization phase: pre-populate defaults from whatever manifest is
    // already at the destination.
    let existing = manifest::read_manifest(&project_dir).await?;
    let props = ManifestProps::from_manifest(&existing);

    let kind = select_kind(&args)?;
    let name = input_name(&args)?;
    let request = GenerationRequest { kind, name };

    let template_root = scaffold::resolve_template_root(args.template_dir.clone())?;
    let written = write_scaffold(&template_root, &project_dir, &request, &props, args.force).await?;

    print_summary(&project_dir, &written);
    cliclack::outro("Happy hacking!")?;

    Ok(())
}

async fn check_generator_version<S: VersionSource>(source: &S, local_version: &str) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking generator version...");

    match version::check_version(source, local_version).await {
        Ok(GateOutcome::Current { required }) => {
            spinner.stop(format!(
                "Generator {} is current (required {})",
                local_version, required
            ));
            Ok(())
        }
        Ok(GateOutcome::Unavailable { reason }) => {
            spinner.stop("Version check unavailable");
            cliclack::log::warning(format!(
                "Could not reach the registry ({}); continuing",
                reason
            ))?;
            Ok(())
        }
        Err(gate) => {
            spinner.stop("Generator out of date");
            cliclack::log::error(format!("{}", gate))?;
            Err(gate.into())
        }
    }
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
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
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Generation cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn select_kind(args: &CreateArgs) -> Result<ArtifactKind> {
    if let Some(kind) = args.kind {
        cliclack::log::info(format!("Artifact type: {}", kind))?;
        return Ok(kind);
    }

    let mut select = cliclack::select("What shall we create today?");
    for kind in ArtifactKind::ALL {
        select = select.item(kind, kind.display_name(), kind.description());
    }

    Ok(select.interact()?)
}

fn input_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        if name.trim().is_empty() {
            anyhow::bail!("Artifact name cannot be empty");
        }
        cliclack::log::info(format!("Name: {}", name))?;
        return Ok(name.clone());
    }

    let name: String = cliclack::input("Name for this artifact")
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err("Value is required")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(name)
}

async fn write_scaffold(
    template_root: &Path,
    project_dir: &Path,
    request: &GenerationRequest,
    props: &ManifestProps,
    force: bool,
) -> Result<Vec<PathBuf>> {
    let spinner = cliclack::spinner();
    spinner.start("Writing files...");

    match apply_plan(template_root, project_dir, request, props, force).await {
        Ok(written) => {
            spinner.stop(format!("Wrote {} file(s)", written.len()));
            Ok(written)
        }
        Err(e) => {
            spinner.stop("Generation failed");
            if e.downcast_ref::<scaffold::ScaffoldError>().is_some() {
                cliclack::log::info("Pass --force to overwrite existing files")?;
            }
            Err(e)
        }
    }
}

async fn apply_plan(
    template_root: &Path,
    project_dir: &Path,
    request: &GenerationRequest,
    props: &ManifestProps,
    force: bool,
) -> Result<Vec<PathBuf>> {
    match plan_for(request) {
        GenerationPlan::CopyTree {
            template,
            merge_manifest,
        } => {
            let mut written =
                scaffold::copy_tree(&template_root.join(template), project_dir).await?;
            if merge_manifest {
                manifest::apply_generated_defaults(project_dir, props).await?;
                written.push(PathBuf::from(manifest::MANIFEST_FILE));
            }
            Ok(written)
        }
        GenerationPlan::RenderFile {
            template,
            dest,
            placeholders,
        } => {
            let overwrite = if force {
                Overwrite::Allow
            } else {
                Overwrite::Deny
            };
            scaffold::render_file(
                &template_root.join(template),
                &project_dir.join(&dest),
                &placeholders,
                overwrite,
            )
            .await?;
            Ok(vec![dest])
        }
    }
}

fn print_summary(project_dir: &Path, written: &[PathBuf]) {
    println!();
    println!("  {} {}", "Generated in".green().bold(), project_dir.display());
    println!();
    for file in written {
        println!("  {} {}", "+".blue(), file.display());
    }
    println!();
}
