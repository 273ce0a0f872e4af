use crate::error::{ReleaseVarsError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with release-precedence comparison.
///
/// Equality and ordering look at major, minor, patch and the pre-release
/// identifiers only. Build metadata is carried along for display but never
/// takes part in a comparison, so `1.0.0+a == 1.0.0+b`.
#[derive(Debug, Clone)]
pub struct SemVer {
    inner: semver::Version,
}

impl SemVer {
    /// Create a plain release version (no pre-release, no build)
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemVer {
            inner: semver::Version::new(major, minor, patch),
        }
    }

    /// Parse `major.minor.patch[-prerelease][+build]`.
    ///
    /// A leading `v` is not accepted here; callers strip it first.
    pub fn parse(text: &str) -> Result<Self> {
        semver::Version::parse(text)
            .map(|inner| SemVer { inner })
            .map_err(|e| ReleaseVarsError::invalid_version(format!("'{}': {}", text, e)))
    }

    pub fn major(&self) -> u64 {
        self.inner.major
    }

    pub fn minor(&self) -> u64 {
        self.inner.minor
    }

    pub fn patch(&self) -> u64 {
        self.inner.patch
    }

    /// Pre-release identifiers in order (`rc.1` -> `["rc", "1"]`)
    pub fn pre_release_tokens(&self) -> Vec<&str> {
        if self.inner.pre.is_empty() {
            Vec::new()
        } else {
            self.inner.pre.as_str().split('.').collect()
        }
    }

    /// Pre-release part joined back with dots, if any
    pub fn suffix(&self) -> Option<&str> {
        (!self.inner.pre.is_empty()).then(|| self.inner.pre.as_str())
    }

    /// Build metadata, if any
    pub fn build(&self) -> Option<&str> {
        (!self.inner.build.is_empty()).then(|| self.inner.build.as_str())
    }

    /// `major` as a string, e.g. `1`
    pub fn major_part(&self) -> String {
        self.major().to_string()
    }

    /// `major.minor`, e.g. `1.1`
    pub fn major_minor_part(&self) -> String {
        format!("{}.{}", self.major(), self.minor())
    }

    /// `major.minor.patch` without pre-release or build, e.g. `1.1.0`
    pub fn major_minor_patch_part(&self) -> String {
        format!("{}.{}.{}", self.major(), self.minor(), self.patch())
    }

    pub fn next_major(&self) -> Self {
        SemVer::new(self.major() + 1, 0, 0)
    }

    pub fn next_minor(&self) -> Self {
        SemVer::new(self.major(), self.minor() + 1, 0)
    }

    pub fn next_patch(&self) -> Self {
        SemVer::new(self.major(), self.minor(), self.patch() + 1)
    }

    /// Same core version with the pre-release replaced by `suffix` and no build.
    ///
    /// Fails when `suffix` is not a valid pre-release identifier.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        let pre = semver::Prerelease::new(suffix).map_err(|e| {
            ReleaseVarsError::invalid_version(format!("suffix '{}': {}", suffix, e))
        })?;

        let mut inner = semver::Version::new(self.major(), self.minor(), self.patch());
        inner.pre = pre;
        Ok(SemVer { inner })
    }
}

impl PartialEq for SemVer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemVer {}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major()
            .cmp(&other.major())
            .then_with(|| self.minor().cmp(&other.minor()))
            .then_with(|| self.patch().cmp(&other.patch()))
            // semver::Prerelease already ranks an empty pre-release above any other
            .then_with(|| self.inner.pre.cmp(&other.inner.pre))
    }
}

impl FromStr for SemVer {
    type Err = ReleaseVarsError;

    fn from_str(s: &str) -> Result<Self> {
        SemVer::parse(s)
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
