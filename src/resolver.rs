//! Release resolution workflow
//!
//! Turns a trigger branch, an optional package version and the state of the
//! repository into the full set of release variables. The work is split in
//! two phases so that everything that can be checked offline fails before
//! the hosting API is contacted:
//!
//! 1. [Resolver::plan] - release version from the branch or input, parsed
//! 2. [Resolver::complete] - duplicate check, latest-scope flags, target branch
//!
//! [run] wires both phases to a [CiContext] and a [RepositoryProvider] and
//! emits the outputs only once the whole resolution succeeded.

use crate::ci::CiContext;
use crate::config::{Config, ReleaseConfig};
use crate::domain::branch::strip_v_prefix;
use crate::domain::{
    branch_ref, extract_release_version, find_maintenance_branch, KnownVersions, LatestScopes,
    SemVer,
};
use crate::error::{ReleaseVarsError, Result};
use crate::git::{Repository, RepositoryProvider};
use crate::outputs::OutputVar;

/// Name of the action input carrying the package version
pub const PACKAGE_VERSION_INPUT: &str = "package_version";

/// What the CI run was started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInput {
    /// Package version with any leading `v` removed
    pub package_version: Option<String>,
    pub trigger_branch: String,
    pub run_id: String,
}

impl ReleaseInput {
    pub fn new(trigger_branch: impl Into<String>, run_id: impl Into<String>) -> Self {
        ReleaseInput {
            package_version: None,
            trigger_branch: trigger_branch.into(),
            run_id: run_id.into(),
        }
    }

    /// Set the package version, stripping a leading `v`
    pub fn with_package_version(mut self, version: impl AsRef<str>) -> Self {
        self.package_version = Some(strip_v_prefix(version.as_ref()).to_string());
        self
    }

    /// Read the input from the CI context
    ///
    /// # Errors
    /// `InvalidBranch` when the run was triggered by something other than a branch.
    pub fn from_context<C: CiContext + ?Sized>(ctx: &C) -> Result<Self> {
        let package_version = ctx
            .input(PACKAGE_VERSION_INPUT)
            .map(|v| strip_v_prefix(&v).to_string());

        if !ctx.is_ref_type_branch() {
            return Err(ReleaseVarsError::invalid_branch(
                "the triggering ref should be a branch",
            ));
        }

        Ok(ReleaseInput {
            package_version,
            trigger_branch: ctx.ref_name()?,
            run_id: ctx.run_id()?,
        })
    }
}

/// Result of the offline phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRelease {
    pub trigger_branch: String,
    pub run_branch: String,
    pub version: SemVer,
}

/// Every value computed for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutput {
    pub version: SemVer,
    pub latest: LatestScopes,

    pub git_tag: String,
    pub git_tag_major: Option<String>,
    pub git_tag_minor: Option<String>,
    pub git_tag_patch: Option<String>,

    pub docker_tag: String,
    pub docker_tag_major: Option<String>,
    pub docker_tag_minor: Option<String>,
    pub docker_tag_patch: Option<String>,

    pub next_major_version: SemVer,
    pub next_minor_version: SemVer,
    pub next_patch_version: SemVer,
    pub next_major_snapshot_version: SemVer,
    pub next_minor_snapshot_version: SemVer,
    pub next_patch_snapshot_version: SemVer,

    pub trigger_branch: String,
    pub run_branch: String,
    pub target_branch: String,
}

impl ReleaseOutput {
    /// Value of one output variable; `None` means the variable is not emitted
    pub fn get(&self, var: OutputVar) -> Option<String> {
        match var {
            OutputVar::Version => Some(self.version.to_string()),
            OutputVar::VersionMajor => Some(self.version.major().to_string()),
            OutputVar::VersionMinor => Some(self.version.minor().to_string()),
            OutputVar::VersionPatch => Some(self.version.patch().to_string()),
            OutputVar::VersionSuffix => self.version.suffix().map(str::to_string),
            OutputVar::VersionBuild => self.version.build().map(str::to_string),
            OutputVar::GitTag => Some(self.git_tag.clone()),
            OutputVar::GitTagMajor => self.git_tag_major.clone(),
            OutputVar::GitTagMinor => self.git_tag_minor.clone(),
            OutputVar::GitTagPatch => self.git_tag_patch.clone(),
            OutputVar::DockerTag => Some(self.docker_tag.clone()),
            OutputVar::DockerTagMajor => self.docker_tag_major.clone(),
            OutputVar::DockerTagMinor => self.docker_tag_minor.clone(),
            OutputVar::DockerTagPatch => self.docker_tag_patch.clone(),
            OutputVar::NextMajorVersion => Some(self.next_major_version.to_string()),
            OutputVar::NextMinorVersion => Some(self.next_minor_version.to_string()),
            OutputVar::NextPatchVersion => Some(self.next_patch_version.to_string()),
            OutputVar::NextMajorSnapshotVersion => {
                Some(self.next_major_snapshot_version.to_string())
            }
            OutputVar::NextMinorSnapshotVersion => {
                Some(self.next_minor_snapshot_version.to_string())
            }
            OutputVar::NextPatchSnapshotVersion => {
                Some(self.next_patch_snapshot_version.to_string())
            }
            OutputVar::TriggerBranch => Some(self.trigger_branch.clone()),
            OutputVar::TriggerBranchRef => Some(branch_ref(&self.trigger_branch)),
            OutputVar::RunBranch => Some(self.run_branch.clone()),
            OutputVar::RunBranchRef => Some(branch_ref(&self.run_branch)),
            OutputVar::TargetBranch => Some(self.target_branch.clone()),
            OutputVar::TargetBranchRef => Some(branch_ref(&self.target_branch)),
        }
    }

    /// All variables in declaration order
    pub fn variables(&self) -> Vec<(OutputVar, Option<String>)> {
        OutputVar::ALL
            .iter()
            .map(|var| (*var, self.get(*var)))
            .collect()
    }

    /// Hand every present variable to the CI context as one batch
    pub fn emit<C: CiContext + ?Sized>(&self, ctx: &mut C) -> Result<()> {
        let present: Vec<(&'static str, String)> = self
            .variables()
            .into_iter()
            .filter_map(|(var, value)| value.map(|v| (var.key(), v)))
            .collect();
        let outputs: Vec<(&str, &str)> = present
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        ctx.set_outputs(&outputs)
    }
}

/// Computes release variables according to the naming settings
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    settings: ReleaseConfig,
}

impl Resolver {
    pub fn new(settings: ReleaseConfig) -> Self {
        Resolver { settings }
    }

    /// Branch created for this run, e.g. `releases/run-123456`
    pub fn run_branch_name(&self, run_id: &str) -> String {
        format!("{}{}", self.settings.run_branch_prefix, run_id)
    }

    /// Git tag for a version or version prefix, e.g. `v1.2`
    pub fn git_tag(&self, version: &str) -> String {
        format!("{}{}", self.settings.git_tag_prefix, version)
    }

    /// Offline phase: determine and parse the release version
    pub fn plan(&self, input: &ReleaseInput) -> Result<PlannedRelease> {
        let release_version =
            extract_release_version(&input.trigger_branch, input.package_version.as_deref())?;
        let version: SemVer = release_version.parse()?;

        Ok(PlannedRelease {
            trigger_branch: input.trigger_branch.clone(),
            run_branch: self.run_branch_name(&input.run_id),
            version,
        })
    }

    /// Repository phase: check existing tags and pick the target branch
    ///
    /// # Errors
    /// * `DuplicateVersion` - a tag for the release version already exists
    /// * `NotFound` - no maintenance branch matches and there is no default branch
    pub fn complete<R: Repository + ?Sized>(
        &self,
        plan: PlannedRelease,
        repo: &R,
    ) -> Result<ReleaseOutput> {
        let version = plan.version;
        let release_version = version.to_string();

        let known = KnownVersions::from_tags(repo.list_tags()?);
        tracing::debug!(count = known.len(), "semantic version tags found");
        if known.contains(&release_version) {
            return Err(ReleaseVarsError::duplicate_version(release_version));
        }

        let known_versions: Vec<&str> = known.versions().collect();
        let latest = LatestScopes::evaluate(&version, &known_versions)?;
        tracing::debug!(?latest, "latest scopes evaluated");

        let branches = repo.list_branch_names()?;
        let target_branch = match find_maintenance_branch(&version, &branches) {
            Some(branch) => branch,
            None => repo.default_branch()?.ok_or_else(|| {
                ReleaseVarsError::not_found(format!(
                    "no maintenance branch for {} and no default branch",
                    release_version
                ))
            })?,
        };

        let major = version.major_part();
        let major_minor = version.major_minor_part();
        let major_minor_patch = version.major_minor_patch_part();
        let suffix = &self.settings.snapshot_suffix;

        let next_major_version = version.next_major();
        let next_minor_version = version.next_minor();
        let next_patch_version = version.next_patch();

        tracing::info!(version = %release_version, %target_branch, "release resolved");

        Ok(ReleaseOutput {
            git_tag: self.git_tag(&release_version),
            git_tag_major: latest.major.then(|| self.git_tag(&major)),
            git_tag_minor: latest.major_minor.then(|| self.git_tag(&major_minor)),
            git_tag_patch: latest.major_minor_patch.then(|| self.git_tag(&major_minor_patch)),

            docker_tag: release_version,
            docker_tag_major: latest.major.then_some(major),
            docker_tag_minor: latest.major_minor.then_some(major_minor),
            docker_tag_patch: latest.major_minor_patch.then_some(major_minor_patch),

            next_major_snapshot_version: next_major_version.with_suffix(suffix)?,
            next_minor_snapshot_version: next_minor_version.with_suffix(suffix)?,
            next_patch_snapshot_version: next_patch_version.with_suffix(suffix)?,
            next_major_version,
            next_minor_version,
            next_patch_version,

            trigger_branch: plan.trigger_branch,
            run_branch: plan.run_branch,
            target_branch,

            version,
            latest,
        })
    }

    /// Both phases against an already opened repository
    pub fn resolve<R: Repository + ?Sized>(
        &self,
        input: &ReleaseInput,
        repo: &R,
    ) -> Result<ReleaseOutput> {
        let plan = self.plan(input)?;
        self.complete(plan, repo)
    }
}

/// Run a complete resolution for the current CI run and emit its outputs.
///
/// Nothing is emitted unless every step succeeds.
pub fn run<C, P>(ctx: &mut C, provider: &P, config: &Config) -> Result<ReleaseOutput>
where
    C: CiContext + ?Sized,
    P: RepositoryProvider + ?Sized,
{
    let input = ReleaseInput::from_context(&*ctx)?;
    ctx.debug(&format!(
        "parameters: [package_version: {}]",
        input.package_version.as_deref().unwrap_or("<none>")
    ));

    let resolver = Resolver::new(config.release.clone());
    let plan = resolver.plan(&input)?;
    ctx.debug(&format!("release version: {}", plan.version));

    let token = if provider.requires_token() {
        ctx.required_env(&config.github.token_env)?
    } else {
        String::new()
    };
    let api_url = ctx
        .api_url()
        .unwrap_or_else(|| config.github.api_url.clone());
    let slug = ctx.repository_slug()?;

    ctx.debug("repository connection: check.");
    let repo = provider.open(&api_url, &token, &slug)?;
    ctx.debug("repository connection: ok.");

    let output = resolver.complete(plan, &repo)?;
    output.emit(ctx)?;
    Ok(output)
}
