//! End-to-end generation tests against a fixture template root

use std::path::{Path, PathBuf};

use appgen_core::manifest::{self, ManifestProps};
use appgen_core::scaffold::{
    self, plan_for, ArtifactKind, GenerationPlan, GenerationRequest, Overwrite,
};
use serde_json::json;
use tempfile::TempDir;

/// Build a template root shaped like the shipped `templates/` directory
fn fixture_template_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();

    let app = root.path().join("react-app");
    std::fs::create_dir_all(app.join("src/screens")).unwrap();
    std::fs::write(app.join(".gitignore"), "node_modules/\n").unwrap();
    std::fs::write(app.join("index.js"), "import App from './src/App';\n").unwrap();
    std::fs::write(app.join("src/App.js"), "export default () => null;\n").unwrap();
    std::fs::write(
        app.join("src/screens/Home.js"),
        "export default () => null;\n",
    )
    .unwrap();

    std::fs::write(
        root.path().join("component.js"),
        "const {{name}} = () => null;\n\nexport default {{name}};\n",
    )
    .unwrap();
    std::fs::write(
        root.path().join("module.js"),
        "// {{name}} state module\nexport default function reducer(state = {}) {\n  return state;\n}\n",
    )
    .unwrap();

    root
}

/// Drive the library the way the interactive flow does: props captured during
/// initialization, then the plan executed against the destination.
async fn generate(
    template_root: &Path,
    project_dir: &Path,
    request: &GenerationRequest,
) -> anyhow::Result<()> {
    let initial = manifest::read_manifest(project_dir).await?;
    let props = ManifestProps::from_manifest(&initial);

    match plan_for(request) {
        GenerationPlan::CopyTree {
            template,
            merge_manifest,
        } => {
            scaffold::copy_tree(&template_root.join(template), project_dir).await?;
            if merge_manifest {
                manifest::apply_generated_defaults(project_dir, &props).await?;
            }
        }
        GenerationPlan::RenderFile {
            template,
            dest,
            placeholders,
        } => {
            scaffold::render_file(
                &template_root.join(template),
                &project_dir.join(dest),
                &placeholders,
                Overwrite::Deny,
            )
            .await?;
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_app_generation_preserves_existing_manifest_values() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let existing = json!({
        "name": "existing-app",
        "version": "3.2.1",
        "description": "an app",
        "files": ["dist"],
        "author": "Jane <jane@example.com>"
    });
    std::fs::write(
        dest.path().join("package.json"),
        serde_json::to_string_pretty(&existing).unwrap(),
    )
    .unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::App,
        name: "whatever".to_string(),
    };
    generate(templates.path(), dest.path(), &request)
        .await
        .unwrap();

    // template tree landed, dotfile included
    assert_eq!(
        std::fs::read_to_string(dest.path().join(".gitignore")).unwrap(),
        "node_modules/\n"
    );
    assert!(dest.path().join("src/screens/Home.js").exists());

    // every pre-existing key kept its value
    let merged = manifest::read_manifest(dest.path()).await.unwrap();
    assert_eq!(merged["name"], json!("existing-app"));
    assert_eq!(merged["version"], json!("3.2.1"));
    assert_eq!(merged["description"], json!("an app"));
    assert_eq!(merged["files"], json!(["dist"]));
    assert_eq!(merged["author"], json!("Jane <jane@example.com>"));

    // generator defaults filled the gaps
    assert_eq!(merged["keywords"], json!([]));
    assert_eq!(merged["engines"], json!({ "npm": ">= 10.0.0" }));
}

#[tokio::test]
async fn test_app_generation_into_empty_destination() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::App,
        name: "fresh".to_string(),
    };
    generate(templates.path(), dest.path(), &request)
        .await
        .unwrap();

    let merged = manifest::read_manifest(dest.path()).await.unwrap();
    assert_eq!(merged["version"], json!("0.0.1"));
    assert_eq!(merged["files"], json!(["lib"]));
    // nothing to inherit a name or author from
    assert!(!merged.contains_key("name"));
    assert!(!merged.contains_key("author"));
}

#[tokio::test]
async fn test_illegal_manifest_name_leaves_manifest_untouched() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let original = r#"{ "name": "Illegal Name", "version": "3.2.1" }"#;
    std::fs::write(dest.path().join("package.json"), original).unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::App,
        name: "whatever".to_string(),
    };
    let err = generate(templates.path(), dest.path(), &request)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not a legal package name"));

    // the manifest never gained generator defaults
    let on_disk = std::fs::read_to_string(dest.path().join("package.json")).unwrap();
    assert_eq!(on_disk, original);
}

#[tokio::test]
async fn test_screen_generation_writes_named_component() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::Screen,
        name: "Profile".to_string(),
    };
    generate(templates.path(), dest.path(), &request)
        .await
        .unwrap();

    let written = std::fs::read_to_string(dest.path().join("components/Profile.js")).unwrap();
    assert!(written.contains("const Profile"));
    assert!(written.contains("export default Profile;"));

    // screens never touch the manifest
    assert!(!dest.path().join("package.json").exists());
}

#[tokio::test]
async fn test_module_generation_lowercases_filename() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::ReduxModule,
        name: "Session".to_string(),
    };
    generate(templates.path(), dest.path(), &request)
        .await
        .unwrap();

    let path = dest.path().join("modules/session.js");
    let written = std::fs::read_to_string(&path).unwrap();
    // filename is lowercased, content keeps the authored casing
    assert!(written.contains("// Session state module"));
}

#[tokio::test]
async fn test_second_screen_render_is_refused() {
    let templates = fixture_template_root();
    let dest = tempfile::tempdir().unwrap();

    let request = GenerationRequest {
        kind: ArtifactKind::Screen,
        name: "Profile".to_string(),
    };
    generate(templates.path(), dest.path(), &request)
        .await
        .unwrap();
    let err = generate(templates.path(), dest.path(), &request)
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<scaffold::ScaffoldError>().is_some());
}

#[test]
fn test_template_root_resolution() {
    let templates = fixture_template_root();
    let resolved =
        scaffold::resolve_template_root(Some(templates.path().to_path_buf())).unwrap();
    assert_eq!(resolved, templates.path());

    let err = scaffold::resolve_template_root(Some(PathBuf::from("/nonexistent/templates")))
        .unwrap_err();
    assert!(err.to_string().contains("Template directory not found"));
}
