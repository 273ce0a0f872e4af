//! Names of the variables handed back to the CI system.
//!
//! Downstream workflow steps refer to these names, so they must never change.

use std::fmt;

/// An output variable emitted after a successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputVar {
    Version,
    VersionMajor,
    VersionMinor,
    VersionPatch,
    VersionSuffix,
    VersionBuild,
    GitTag,
    GitTagMajor,
    GitTagMinor,
    GitTagPatch,
    DockerTag,
    DockerTagMajor,
    DockerTagMinor,
    DockerTagPatch,
    NextMajorVersion,
    NextMinorVersion,
    NextPatchVersion,
    NextMajorSnapshotVersion,
    NextMinorSnapshotVersion,
    NextPatchSnapshotVersion,
    TriggerBranch,
    TriggerBranchRef,
    RunBranch,
    RunBranchRef,
    TargetBranch,
    TargetBranchRef,
}

impl OutputVar {
    pub const ALL: [OutputVar; 26] = [
        OutputVar::Version,
        OutputVar::VersionMajor,
        OutputVar::VersionMinor,
        OutputVar::VersionPatch,
        OutputVar::VersionSuffix,
        OutputVar::VersionBuild,
        OutputVar::GitTag,
        OutputVar::GitTagMajor,
        OutputVar::GitTagMinor,
        OutputVar::GitTagPatch,
        OutputVar::DockerTag,
        OutputVar::DockerTagMajor,
        OutputVar::DockerTagMinor,
        OutputVar::DockerTagPatch,
        OutputVar::NextMajorVersion,
        OutputVar::NextMinorVersion,
        OutputVar::NextPatchVersion,
        OutputVar::NextMajorSnapshotVersion,
        OutputVar::NextMinorSnapshotVersion,
        OutputVar::NextPatchSnapshotVersion,
        OutputVar::TriggerBranch,
        OutputVar::TriggerBranchRef,
        OutputVar::RunBranch,
        OutputVar::RunBranchRef,
        OutputVar::TargetBranch,
        OutputVar::TargetBranchRef,
    ];

    /// External variable name
    pub fn key(&self) -> &'static str {
        match self {
            OutputVar::Version => "version",
            OutputVar::VersionMajor => "version_major",
            OutputVar::VersionMinor => "version_minor",
            OutputVar::VersionPatch => "version_patch",
            OutputVar::VersionSuffix => "version_suffix",
            OutputVar::VersionBuild => "version_build",
            OutputVar::GitTag => "git_tag",
            OutputVar::GitTagMajor => "git_tag_major",
            OutputVar::GitTagMinor => "git_tag_minor",
            OutputVar::GitTagPatch => "git_tag_patch",
            OutputVar::DockerTag => "docker_tag",
            OutputVar::DockerTagMajor => "docker_tag_major",
            OutputVar::DockerTagMinor => "docker_tag_minor",
            OutputVar::DockerTagPatch => "docker_tag_patch",
            OutputVar::NextMajorVersion => "next_major_version",
            OutputVar::NextMinorVersion => "next_minor_version",
            OutputVar::NextPatchVersion => "next_patch_version",
            OutputVar::NextMajorSnapshotVersion => "next_major_snapshot_version",
            OutputVar::NextMinorSnapshotVersion => "next_minor_snapshot_version",
            OutputVar::NextPatchSnapshotVersion => "next_patch_snapshot_version",
            OutputVar::TriggerBranch => "trigger_branch",
            OutputVar::TriggerBranchRef => "trigger_branch_ref",
            OutputVar::RunBranch => "run_branch",
            OutputVar::RunBranchRef => "run_branch_ref",
            OutputVar::TargetBranch => "target_branch",
            OutputVar::TargetBranchRef => "target_branch_ref",
        }
    }
}

impl fmt::Display for OutputVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
