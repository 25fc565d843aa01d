//! Version gating against the published generator version
//!
//! The gate runs before anything is written. The required minimum comes from a
//! pluggable [`VersionSource`] so that tests and offline runs are not tied to
//! the real registry.

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Published package name looked up on the registry
pub const GENERATOR_PACKAGE: &str = "appgen";

/// Default npm-style registry queried for the latest published version
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Environment variable name for overriding the registry URL
pub const REGISTRY_URL_ENV: &str = "APPGEN_REGISTRY_URL";

/// Why the gate refused to let the run proceed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionGateError {
    #[error(
        "installed generator {local} is older than the required {required}; upgrade and run again"
    )]
    Blocked { required: String, local: String },

    #[error("cannot compare generator versions: '{value}' is not valid semver")]
    Malformed { value: String },
}

/// Where the required minimum generator version comes from
#[allow(async_fn_in_trait)]
pub trait VersionSource {
    /// Latest required generator version, as published
    async fn latest_required(&self) -> Result<String>;
}

/// Looks up the latest published release of the generator package on an
/// npm-style registry (`GET {registry}/{package}/latest`).
pub struct RegistryVersionSource {
    client: reqwest::Client,
    base: Url,
    package: String,
}

impl RegistryVersionSource {
    pub fn new(base: Url, package: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(package)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base,
            package: package.to_string(),
        }
    }

    /// Registry URL from `APPGEN_REGISTRY_URL`, falling back to the public registry
    pub fn from_env(package: &str) -> Result<Self> {
        let url_str = std::env::var(REGISTRY_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
        let base =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        Ok(Self::new(base, package))
    }

    /// Build the `/{package}/latest` URL, preserving any base path
    fn latest_url(&self) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base))?
            .pop_if_empty()
            .push(&self.package)
            .push("latest");
        Ok(url)
    }
}

/// Registry response for the `latest` dist-tag
#[derive(Debug, Deserialize)]
struct LatestRelease {
    version: String,
}

impl VersionSource for RegistryVersionSource {
    async fn latest_required(&self) -> Result<String> {
        let url = self.latest_url()?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to query registry at {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Registry lookup for '{}' failed: HTTP {}",
                self.package,
                response.status()
            );
        }

        let release: LatestRelease = response
            .json()
            .await
            .context("Failed to parse registry response")?;
        Ok(release.version)
    }
}

/// Fixed version source for tests and offline runs
#[derive(Debug, Clone)]
pub struct StaticVersionSource(pub String);

impl VersionSource for StaticVersionSource {
    async fn latest_required(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Outcome of consulting a version source before a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The lookup succeeded and the installed generator meets the minimum
    Current { required: String },
    /// The source could not be reached; the gate does not block
    Unavailable { reason: String },
}

/// Consult the version source and apply the gate policy: only a successful
/// lookup can block. An unreachable source yields [`GateOutcome::Unavailable`]
/// and the run proceeds.
pub async fn check_version<S: VersionSource>(
    source: &S,
    local: &str,
) -> Result<GateOutcome, VersionGateError> {
    match source.latest_required().await {
        Ok(required) => {
            ensure_supported(&required, local)?;
            Ok(GateOutcome::Current { required })
        }
        Err(e) => Ok(GateOutcome::Unavailable {
            reason: e.to_string(),
        }),
    }
}

fn parse_version(value: &str) -> Result<Version, VersionGateError> {
    // Tolerate a leading 'v' as published by some registries
    let cleaned = value.strip_prefix('v').unwrap_or(value);
    Version::parse(cleaned).map_err(|_| VersionGateError::Malformed {
        value: value.to_string(),
    })
}

/// Gate the run on the required minimum version, using semver precedence
/// (pre-release tags included). `required > local` blocks. A malformed version
/// on either side blocks rather than silently passing.
pub fn ensure_supported(required: &str, local: &str) -> Result<(), VersionGateError> {
    let required_ver = parse_version(required)?;
    let local_ver = parse_version(local)?;

    if required_ver > local_ver {
        return Err(VersionGateError::Blocked {
            required: required.to_string(),
            local: local.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_older_than_required_blocks() {
        let err = ensure_supported("2.0.0", "1.0.0").unwrap_err();
        assert_eq!(
            err,
            VersionGateError::Blocked {
                required: "2.0.0".to_string(),
                local: "1.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_equal_versions_proceed() {
        assert!(ensure_supported("1.0.0", "1.0.0").is_ok());
    }

    #[test]
    fn test_local_newer_than_required_proceeds() {
        assert!(ensure_supported("1.0.0", "1.4.2").is_ok());
    }

    #[test]
    fn test_prerelease_precedence() {
        // 1.0.0-rc.1 < 1.0.0, so a stable requirement blocks an rc install
        let err = ensure_supported("1.0.0", "1.0.0-rc.1").unwrap_err();
        assert!(matches!(err, VersionGateError::Blocked { .. }));
        assert!(ensure_supported("1.0.0-rc.1", "1.0.0").is_ok());
    }

    #[test]
    fn test_malformed_versions_block() {
        let err = ensure_supported("not-a-version", "1.0.0").unwrap_err();
        assert_eq!(
            err,
            VersionGateError::Malformed {
                value: "not-a-version".to_string(),
            }
        );

        let err = ensure_supported("1.0.0", "also bad").unwrap_err();
        assert!(matches!(err, VersionGateError::Malformed { .. }));
    }

    #[test]
    fn test_leading_v_is_tolerated() {
        assert!(ensure_supported("v1.0.0", "1.0.0").is_ok());
    }

    struct FailingVersionSource;

    impl VersionSource for FailingVersionSource {
        async fn latest_required(&self) -> Result<String> {
            anyhow::bail!("registry offline")
        }
    }

    #[tokio::test]
    async fn test_unreachable_source_does_not_block() {
        let outcome = check_version(&FailingVersionSource, "1.0.0").await.unwrap();
        assert!(matches!(outcome, GateOutcome::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_successful_lookup_blocks_old_generator() {
        let source = StaticVersionSource("2.0.0".to_string());
        let err = check_version(&source, "1.0.0").await.unwrap_err();
        assert!(matches!(err, VersionGateError::Blocked { .. }));
    }

    #[tokio::test]
    async fn test_successful_lookup_passes_current_generator() {
        let source = StaticVersionSource("1.0.0".to_string());
        let outcome = check_version(&source, "1.0.0").await.unwrap();
        assert_eq!(
            outcome,
            GateOutcome::Current {
                required: "1.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_latest_url_appends_package_and_tag() {
        let base = Url::parse("https://registry.example.com").unwrap();
        let source = RegistryVersionSource::new(base, "appgen");
        assert_eq!(
            source.latest_url().unwrap().as_str(),
            "https://registry.example.com/appgen/latest"
        );
    }

    #[test]
    fn test_latest_url_preserves_base_path() {
        let base = Url::parse("https://mirror.example.com/npm/").unwrap();
        let source = RegistryVersionSource::new(base, "appgen");
        assert_eq!(
            source.latest_url().unwrap().as_str(),
            "https://mirror.example.com/npm/appgen/latest"
        );
    }
}
