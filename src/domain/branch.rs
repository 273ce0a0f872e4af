//! Release branch naming rules.
//!
//! Two fixed, case-sensitive grammars are recognised:
//! - trigger branches: `releases/trigger` or `releases/trigger-[v]<version>`
//! - maintenance branches: `maintenances/<major>.x` or `maintenances/<major>.<minor>.x`

use crate::domain::SemVer;
use crate::error::{ReleaseVarsError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn trigger_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^releases/trigger(-v?(?P<version>[0-9]+\.[0-9]+\.[0-9]+[A-Za-z0-9_.+\-]*))?$")
            .expect("trigger branch pattern is valid")
    })
}

fn maintenance_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^maintenances/(?P<major>[0-9]+)\.((?P<minor>[0-9]+)\.)?x$")
            .expect("maintenance branch pattern is valid")
    })
}

/// Strip a single leading lowercase `v` from a version string
pub fn strip_v_prefix(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// Determine the release version for a trigger branch.
///
/// A version embedded in the branch name wins over `package_version`.
///
/// # Errors
/// * `InvalidBranch` - the branch is not a trigger branch
/// * `MissingVersion` - the branch carries no version and `package_version` is `None`
pub fn extract_release_version(branch_name: &str, package_version: Option<&str>) -> Result<String> {
    let captures = trigger_pattern().captures(branch_name).ok_or_else(|| {
        ReleaseVarsError::invalid_branch(format!(
            "'{}' should match releases/trigger(-<version>)? format",
            branch_name
        ))
    })?;

    match captures.name("version") {
        Some(version) => Ok(version.as_str().to_string()),
        None => package_version.map(str::to_string).ok_or_else(|| {
            ReleaseVarsError::missing_version(format!(
                "branch '{}' carries no version and no package_version input was given",
                branch_name
            ))
        }),
    }
}

/// A parsed `maintenances/...` branch name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceBranch {
    pub name: String,
    pub major: u64,
    pub minor: Option<u64>,
}

impl MaintenanceBranch {
    /// Parse a branch name, returning `None` for anything that is not a maintenance branch
    pub fn parse(name: &str) -> Option<Self> {
        let captures = maintenance_pattern().captures(name)?;
        let major = captures.name("major")?.as_str().parse().ok()?;
        let minor = match captures.name("minor") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };

        Some(MaintenanceBranch {
            name: name.to_string(),
            major,
            minor,
        })
    }

    /// Whether releases of `version` belong on this branch
    pub fn covers(&self, version: &SemVer) -> bool {
        self.major == version.major() && self.minor.map_or(true, |minor| minor == version.minor())
    }
}

/// Find the maintenance branch that should receive `version`.
///
/// The first covering branch in iteration order wins; no precedence is given
/// to `major.minor.x` over `major.x` when both exist.
pub fn find_maintenance_branch<I, S>(version: &SemVer, branch_names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    branch_names
        .into_iter()
        .filter_map(|name| MaintenanceBranch::parse(name.as_ref()))
        .find(|branch| branch.covers(version))
        .map(|branch| branch.name)
}

/// Git ref for a branch name
pub fn branch_ref(branch_name: &str) -> String {
    format!("refs/heads/{}", branch_name)
}
