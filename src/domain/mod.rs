//! Domain logic - pure release rules independent of CI and repository hosting

pub mod branch;
pub mod scope;
pub mod tag;
pub mod version;

pub use branch::{branch_ref, extract_release_version, find_maintenance_branch, MaintenanceBranch};
pub use scope::{is_latest_in_scope, LatestScopes, VersionScope};
pub use tag::{KnownVersions, TagRef};
pub use version::SemVer;
