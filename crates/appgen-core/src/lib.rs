//! Appgen Core - engine behind the `appgen` scaffolding CLI
//!
//! This library implements the full generation pipeline: gating the run on the
//! published generator version, pre-populating defaults from the destination's
//! `package.json`, mapping the chosen artifact type to a template plan, and
//! writing the scaffold (tree copy or placeholder render, plus manifest merge
//! for full project skeletons).
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use appgen_core::scaffold::{plan_for, ArtifactKind, GenerationRequest};
//!
//! let request = GenerationRequest {
//!     kind: ArtifactKind::Screen,
//!     name: "Profile".to_string(),
//! };
//! let plan = plan_for(&request);
//! // execute the plan with scaffold::writer against a template root
//! ```

pub mod author;
pub mod manifest;
pub mod scaffold;
pub mod validate;
pub mod version;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use author::AuthorInfo;
pub use manifest::{apply_generated_defaults, default_manifest, merge_manifests, ManifestProps};
pub use scaffold::{plan_for, ArtifactKind, GenerationPlan, GenerationRequest};
pub use version::{
    check_version, ensure_supported, GateOutcome, RegistryVersionSource, StaticVersionSource,
    VersionGateError, VersionSource,
};

#[cfg(feature = "tui")]
pub use tui::run;
