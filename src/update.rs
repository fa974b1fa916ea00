use crate::error::{NarrativeError, Result};
use serde::Deserialize;
use std::cmp::Ordering;

pub const GITHUB_REPO: &str = "VsevolodRakita/sca_scripts";

pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn latest_release_url() -> String {
    format!("https://api.github.com/repos/{}/releases/latest", GITHUB_REPO)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// The fields of GitHub's "latest release" payload that matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub html_url: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl ReleaseInfo {
    pub fn version(&self) -> &str {
        self.tag_name.trim_start_matches('v')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate { current: String },
    Available { latest: String, release_url: String },
}

/// Parses a dotted version such as `v1.2.3` into its numeric parts.
pub fn parse_version(version: &str) -> Result<Vec<u64>> {
    version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| NarrativeError::InvalidVersion(version.to_string()))
        })
        .collect()
}

/// Compares two dotted versions part by part.
pub fn compare_versions(left: &str, right: &str) -> Result<Ordering> {
    Ok(parse_version(left)?.cmp(&parse_version(right)?))
}

pub fn check_release(current: &str, release: &ReleaseInfo) -> Result<UpdateStatus> {
    let latest = release.version();

    if compare_versions(latest, current)? == Ordering::Greater {
        Ok(UpdateStatus::Available {
            latest: latest.to_string(),
            release_url: release.html_url.clone(),
        })
    } else {
        Ok(UpdateStatus::UpToDate {
            current: current.to_string(),
        })
    }
}

/// Shows the release page with `opener`. Returns false when it could not be opened.
pub fn open_release_page<F>(url: &str, opener: F) -> bool
where
    F: FnOnce(&str) -> std::io::Result<()>,
{
    match opener(url) {
        Ok(()) => {
            log::info!("Opened release page: {}", url);
            true
        }
        Err(e) => {
            log::warn!("Could not open release page {}: {}", url, e);
            false
        }
    }
}

/// Queries GitHub for the latest published release.
#[cfg(feature = "update")]
pub fn fetch_latest_release() -> Result<ReleaseInfo> {
    let url = latest_release_url();
    log::debug!("Checking GitHub for latest release: {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| NarrativeError::UpdateCheck(e.to_string()))?;

    client
        .get(&url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json::<ReleaseInfo>())
        .map_err(|e| NarrativeError::UpdateCheck(e.to_string()))
}
