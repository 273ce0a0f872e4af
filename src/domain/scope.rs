//! "Latest version" decisions within a major, major.minor or major.minor.patch line.

use crate::domain::SemVer;
use crate::error::Result;

/// Version line a release is compared within
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionScope {
    /// Same major
    Major,
    /// Same major and minor
    MajorMinor,
    /// Same major, minor and patch
    MajorMinorPatch,
}

impl VersionScope {
    pub const ALL: [VersionScope; 3] = [
        VersionScope::Major,
        VersionScope::MajorMinor,
        VersionScope::MajorMinorPatch,
    ];

    /// Whether `a` and `b` fall in the same line for this scope
    pub fn shares_line(&self, a: &SemVer, b: &SemVer) -> bool {
        match self {
            VersionScope::Major => a.major() == b.major(),
            VersionScope::MajorMinor => a.major() == b.major() && a.minor() == b.minor(),
            VersionScope::MajorMinorPatch => {
                a.major() == b.major() && a.minor() == b.minor() && a.patch() == b.patch()
            }
        }
    }
}

/// Whether `candidate` is the highest version of its line among `known_versions`.
///
/// The candidate always takes part in the comparison, so an empty
/// `known_versions` yields `true`. A known version equal to the candidate
/// (build metadata aside) does not make it lose.
///
/// # Errors
/// `InvalidVersion` if any known version is not a semantic version.
pub fn is_latest_in_scope<I, S>(
    candidate: &SemVer,
    known_versions: I,
    scope: VersionScope,
) -> Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut latest = candidate.clone();
    for known in known_versions {
        let version = SemVer::parse(known.as_ref())?;
        if scope.shares_line(candidate, &version) && version > latest {
            latest = version;
        }
    }
    Ok(&latest == candidate)
}

/// Latest-ness of a release in every scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatestScopes {
    pub major: bool,
    pub major_minor: bool,
    pub major_minor_patch: bool,
}

impl LatestScopes {
    /// Evaluate all three scopes against the same known versions
    pub fn evaluate<S: AsRef<str>>(candidate: &SemVer, known_versions: &[S]) -> Result<Self> {
        let check = |scope| is_latest_in_scope(candidate, known_versions, scope);

        Ok(LatestScopes {
            major: check(VersionScope::Major)?,
            major_minor: check(VersionScope::MajorMinor)?,
            major_minor_patch: check(VersionScope::MajorMinorPatch)?,
        })
    }

    pub fn get(&self, scope: VersionScope) -> bool {
        match scope {
            VersionScope::Major => self.major,
            VersionScope::MajorMinor => self.major_minor,
            VersionScope::MajorMinorPatch => self.major_minor_patch,
        }
    }
}
