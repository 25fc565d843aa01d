//! Mapping a generation request to a concrete plan

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Artifact categories the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    App,
    Screen,
    ReduxModule,
    PulumiStack,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::App,
        ArtifactKind::Screen,
        ArtifactKind::ReduxModule,
        ArtifactKind::PulumiStack,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::App => "app",
            ArtifactKind::Screen => "screen",
            ArtifactKind::ReduxModule => "redux-module",
            ArtifactKind::PulumiStack => "pulumi",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ArtifactKind::App => "Full application skeleton",
            ArtifactKind::Screen => "UI screen component",
            ArtifactKind::ReduxModule => "Redux state module",
            ArtifactKind::PulumiStack => "Pulumi infrastructure stack",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "app" => Ok(ArtifactKind::App),
            "screen" => Ok(ArtifactKind::Screen),
            "redux-module" | "redux" | "module" => Ok(ArtifactKind::ReduxModule),
            "pulumi" | "pulumi-stack" | "stack" => Ok(ArtifactKind::PulumiStack),
            other => Err(format!(
                "unknown artifact type '{other}' (expected app, screen, redux-module, or pulumi)"
            )),
        }
    }
}

/// A captured user request. The name is collected non-empty at the prompt and
/// the request is consumed by exactly one write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: ArtifactKind,
    pub name: String,
}

/// Template names under the template root
pub const APP_TEMPLATE: &str = "react-app";
pub const PULUMI_TEMPLATE: &str = "pulumi";
pub const SCREEN_TEMPLATE: &str = "component.js";
pub const MODULE_TEMPLATE: &str = "module.js";

/// How a request turns into files on disk
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPlan {
    /// Copy a template tree over the project root, then merge the manifest
    CopyTree {
        template: &'static str,
        merge_manifest: bool,
    },
    /// Render one template file with placeholder substitution
    RenderFile {
        template: &'static str,
        dest: PathBuf,
        placeholders: HashMap<String, String>,
    },
}

/// Map an artifact kind to its generation plan.
///
/// Screens keep the name as authored in both path and content; redux modules
/// lowercase the destination filename but substitute the name as authored.
pub fn plan_for(request: &GenerationRequest) -> GenerationPlan {
    match request.kind {
        ArtifactKind::App => GenerationPlan::CopyTree {
            template: APP_TEMPLATE,
            merge_manifest: true,
        },
        ArtifactKind::PulumiStack => GenerationPlan::CopyTree {
            template: PULUMI_TEMPLATE,
            merge_manifest: true,
        },
        ArtifactKind::Screen => GenerationPlan::RenderFile {
            template: SCREEN_TEMPLATE,
            dest: PathBuf::from("components").join(format!("{}.js", request.name)),
            placeholders: name_placeholders(&request.name),
        },
        ArtifactKind::ReduxModule => GenerationPlan::RenderFile {
            template: MODULE_TEMPLATE,
            dest: PathBuf::from("modules").join(format!("{}.js", request.name.to_lowercase())),
            placeholders: name_placeholders(&request.name),
        },
    }
}

fn name_placeholders(name: &str) -> HashMap<String, String> {
    HashMap::from([("name".to_string(), name.to_string())])
}
