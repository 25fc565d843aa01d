//! appgen - interactive project scaffolding

use anyhow::Result;
use appgen_core::scaffold::ArtifactKind;
use appgen_core::tui::CreateArgs;
use appgen_core::version::{RegistryVersionSource, GENERATOR_PACKAGE};
use clap::Parser;
use std::path::PathBuf;

/// Generator version - checked against the registry's required minimum
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "appgen")]
#[command(about = "Interactive generator for apps, screens, redux modules, and Pulumi stacks")]
#[command(version)]
pub struct Args {
    /// Artifact type to generate (app, screen, redux-module, pulumi)
    #[arg(short = 't', long = "type")]
    pub kind: Option<ArtifactKind>,

    /// Name for the generated artifact
    #[arg(short, long)]
    pub name: Option<String>,

    /// Destination project directory
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory to read templates from instead of the shipped set
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Overwrite existing files produced by single-file renders
    #[arg(short, long)]
    pub force: bool,

    /// Skip the registry version check
    #[arg(long = "skip-version-check")]
    pub skip_version_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            kind: args.kind,
            name: args.name,
            directory: args.directory,
            template_dir: args.template_dir,
            force: args.force,
            skip_version_check: args.skip_version_check,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let source = RegistryVersionSource::from_env(GENERATOR_PACKAGE)?;

    let result = appgen_core::tui::run(&source, args.into(), GENERATOR_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
