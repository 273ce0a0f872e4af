// tests/config_test.rs
use semver_release_vars::config::{load_config, Config};
use semver_release_vars::ReleaseVarsError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[release]
snapshot_suffix = "dev"
run_branch_prefix = "ci/run-"
git_tag_prefix = "release-"

[github]
token_env = "GH_RELEASE_TOKEN"
api_url = "https://ghe.example.com/api/v3"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.release.snapshot_suffix, "dev");
    assert_eq!(config.release.run_branch_prefix, "ci/run-");
    assert_eq!(config.release.git_tag_prefix, "release-");
    assert_eq!(config.github.token_env, "GH_RELEASE_TOKEN");
    assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[github]\ntoken_env = \"RELEASE_TOKEN\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.github.token_env, "RELEASE_TOKEN");
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert_eq!(config.release, Config::default().release);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = load_config(Some(path.to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::Io(_)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[release]\nsnapshot_suffix = 12\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, ReleaseVarsError::Toml(_)));
}
