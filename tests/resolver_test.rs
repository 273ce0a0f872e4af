// tests/resolver_test.rs
use semver_release_vars::ci::{GitHubActionsContext, MockContext};
use semver_release_vars::config::Config;
use semver_release_vars::git::{MockProvider, MockRepository};
use semver_release_vars::outputs::OutputVar;
use semver_release_vars::resolver::{run, PACKAGE_VERSION_INPUT};
use semver_release_vars::ReleaseVarsError;
use std::fs;

const SLUG: &str = "octocat/Hello-World";

fn provider(repo: MockRepository) -> MockProvider {
    MockProvider::new(SLUG, repo)
}

fn context(branch: &str) -> MockContext {
    let mut ctx = MockContext::on_branch(branch);
    ctx.set_env("GITHUB_TOKEN", "token");
    ctx
}

fn standard_repo() -> MockRepository {
    MockRepository::new()
        .with_tag_names(["v1.0.0", "nightly", "1.0.0-beta.1"])
        .with_branch("main")
        .with_default_branch("main")
}

#[test]
fn test_prerelease_with_build_metadata() {
    let mut ctx = context("releases/trigger");
    ctx.set_input(PACKAGE_VERSION_INPUT, "1.1.0-rc.1+abcdef");

    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();

    assert_eq!(ctx.output("version"), Some("1.1.0-rc.1+abcdef"));
    assert_eq!(ctx.output("version_major"), Some("1"));
    assert_eq!(ctx.output("version_minor"), Some("1"));
    assert_eq!(ctx.output("version_patch"), Some("0"));
    assert_eq!(ctx.output("version_suffix"), Some("rc.1"));
    assert_eq!(ctx.output("version_build"), Some("abcdef"));
    assert_eq!(ctx.output("git_tag"), Some("v1.1.0-rc.1+abcdef"));
    assert_eq!(ctx.output("git_tag_major"), Some("v1"));
    assert_eq!(ctx.output("git_tag_minor"), Some("v1.1"));
    assert_eq!(ctx.output("git_tag_patch"), Some("v1.1.0"));
    assert_eq!(ctx.output("docker_tag"), Some("1.1.0-rc.1+abcdef"));
    assert_eq!(ctx.output("docker_tag_major"), Some("1"));
    assert_eq!(ctx.output("docker_tag_minor"), Some("1.1"));
    assert_eq!(ctx.output("docker_tag_patch"), Some("1.1.0"));
    assert_eq!(ctx.output("next_major_version"), Some("2.0.0"));
    assert_eq!(ctx.output("next_minor_version"), Some("1.2.0"));
    assert_eq!(ctx.output("next_patch_version"), Some("1.1.1"));
    assert_eq!(ctx.output("next_major_snapshot_version"), Some("2.0.0-SNAPSHOT"));
    assert_eq!(ctx.output("next_minor_snapshot_version"), Some("1.2.0-SNAPSHOT"));
    assert_eq!(ctx.output("next_patch_snapshot_version"), Some("1.1.1-SNAPSHOT"));
    assert_eq!(ctx.output("trigger_branch"), Some("releases/trigger"));
    assert_eq!(ctx.output("trigger_branch_ref"), Some("refs/heads/releases/trigger"));
    assert_eq!(ctx.output("run_branch"), Some("releases/run-123456"));
    assert_eq!(ctx.output("run_branch_ref"), Some("refs/heads/releases/run-123456"));
    assert_eq!(ctx.output("target_branch"), Some("main"));
    assert_eq!(ctx.output("target_branch_ref"), Some("refs/heads/main"));
}

#[test]
fn test_outputs_follow_declaration_order() {
    let mut ctx = context("releases/trigger-v2.0.0");
    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();

    let emitted: Vec<&str> = ctx.outputs().iter().map(|(name, _)| name.as_str()).collect();
    let expected: Vec<&str> = OutputVar::ALL
        .iter()
        .map(|var| var.key())
        .filter(|key| *key != "version_suffix" && *key != "version_build")
        .collect();
    assert_eq!(emitted, expected);
}

#[test]
fn test_run_branch_uses_run_id() {
    let mut ctx = context("releases/trigger-2.0.0");
    ctx.set_run_id("5551212");

    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();

    assert_eq!(ctx.output("run_branch"), Some("releases/run-5551212"));
    assert_eq!(ctx.output("run_branch_ref"), Some("refs/heads/releases/run-5551212"));
}

#[test]
fn test_version_from_branch_overrides_input() {
    let mut ctx = context("releases/trigger-v2.0.0");
    ctx.set_input(PACKAGE_VERSION_INPUT, "9.9.9");

    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();
    assert_eq!(ctx.output("version"), Some("2.0.0"));
}

#[test]
fn test_duplicate_version_emits_nothing() {
    let mut ctx = context("releases/trigger-1.0.0");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::DuplicateVersion(ref v) if v == "1.0.0"));
    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_older_release_on_maintenance_branch() {
    let repo = MockRepository::new()
        .with_tag_names(["v1.0.0", "v1.1.0", "v2.0.0"])
        .with_branch("main")
        .with_branch("maintenances/2.x")
        .with_branch("maintenances/1.0.x")
        .with_branch("maintenances/1.x")
        .with_default_branch("main");
    let mut ctx = context("releases/trigger-1.0.1");

    run(&mut ctx, &provider(repo), &Config::default()).unwrap();

    assert_eq!(ctx.output("target_branch"), Some("maintenances/1.0.x"));
    assert_eq!(ctx.output("git_tag_major"), None);
    assert_eq!(ctx.output("git_tag_minor"), Some("v1.0"));
    assert_eq!(ctx.output("git_tag_patch"), Some("v1.0.1"));
    assert_eq!(ctx.output("docker_tag_major"), None);
}

#[test]
fn test_tag_ref_is_rejected() {
    let mut ctx = MockContext::on_tag("v1.0.0");
    ctx.set_env("GITHUB_TOKEN", "token");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::InvalidBranch(_)));
    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_missing_version_is_reported_before_token() {
    let mut ctx = MockContext::on_branch("releases/trigger");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::MissingVersion(_)));
}

#[test]
fn test_missing_token() {
    let mut ctx = MockContext::on_branch("releases/trigger-1.2.0");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::Config(ref msg) if msg.contains("GITHUB_TOKEN")));
    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_custom_token_variable() {
    let mut config = Config::default();
    config.github.token_env = "RELEASE_TOKEN".to_string();
    let mut ctx = MockContext::on_branch("releases/trigger-1.2.0");
    ctx.set_env("RELEASE_TOKEN", "token");

    run(&mut ctx, &provider(standard_repo()), &config).unwrap();
    assert_eq!(ctx.output("version"), Some("1.2.0"));
}

#[test]
fn test_unknown_repository() {
    let mut ctx = context("releases/trigger-1.2.0");
    let other = MockProvider::new("octocat/Other", standard_repo());

    let err = run(&mut ctx, &other, &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::NotFound(_)));
}

#[test]
fn test_no_default_branch() {
    let repo = MockRepository::new().with_branch("maintenances/2.x");
    let mut ctx = context("releases/trigger-1.0.0");

    let err = run(&mut ctx, &provider(repo), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::NotFound(_)));
    assert!(ctx.outputs().is_empty());
}

#[test]
fn test_invalid_version_in_branch() {
    let mut ctx = context("releases/trigger-1.0.0-");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::InvalidVersion(_)));
}

#[test]
fn test_non_trigger_branch() {
    let mut ctx = context("feature/foo");

    let err = run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::InvalidBranch(_)));
}

#[test]
fn test_debug_messages_are_recorded() {
    let mut ctx = context("releases/trigger");
    ctx.set_input(PACKAGE_VERSION_INPUT, "3.0.0");

    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();

    let messages = ctx.debug_messages();
    assert!(messages.iter().any(|m| m == "parameters: [package_version: 3.0.0]"));
    assert!(messages.iter().any(|m| m == "repository connection: ok."));
}

#[test]
fn test_github_context_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("github_output");
    let mut ctx = GitHubActionsContext::from_vars([
        ("GITHUB_ACTIONS", "true"),
        ("GITHUB_REF_TYPE", "branch"),
        ("GITHUB_REF_NAME", "releases/trigger-v1.2.3"),
        ("GITHUB_RUN_ID", "987"),
        ("GITHUB_REPOSITORY", SLUG),
        ("GITHUB_TOKEN", "token"),
        ("GITHUB_OUTPUT", output_path.to_str().unwrap()),
    ]);

    run(&mut ctx, &provider(standard_repo()), &Config::default()).unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "version=1.2.3");
    assert!(lines.contains(&"git_tag=v1.2.3"));
    assert!(lines.contains(&"run_branch=releases/run-987"));
    assert!(lines.contains(&"target_branch_ref=refs/heads/main"));
    assert!(!written.contains("version_suffix="));
}
