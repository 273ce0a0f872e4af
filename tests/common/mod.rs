// tests/common/mod.rs
#![allow(dead_code)]

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use std::path::Path;

/// Scratch repository on `main` with one commit and the layout
///
/// - tags `v1.0.0` (lightweight), `v1.1.0` (annotated), `nightly`
/// - local branches `main`, `maintenances/1.x`
/// - remote branches `origin/main`, `origin/maintenances/2.x`
/// - `origin/HEAD` pointing at `origin/main`
pub fn release_repo(dir: &Path) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir, &opts).unwrap();

    let commit_id = initial_commit(&repo);
    {
        let commit = repo.find_commit(commit_id).unwrap();
        let sig = signature();

        repo.tag_lightweight("v1.0.0", commit.as_object(), false)
            .unwrap();
        repo.tag("v1.1.0", commit.as_object(), &sig, "Release 1.1.0", false)
            .unwrap();
        repo.tag_lightweight("nightly", commit.as_object(), false)
            .unwrap();

        repo.branch("maintenances/1.x", &commit, false).unwrap();
    }

    repo.reference("refs/remotes/origin/main", commit_id, true, "test")
        .unwrap();
    repo.reference(
        "refs/remotes/origin/maintenances/2.x",
        commit_id,
        true,
        "test",
    )
    .unwrap();
    repo.reference_symbolic(
        "refs/remotes/origin/HEAD",
        "refs/remotes/origin/main",
        true,
        "test",
    )
    .unwrap();

    repo
}

fn signature() -> Signature<'static> {
    Signature::now("Release Bot", "release-bot@example.com").unwrap()
}

fn initial_commit(repo: &Repository) -> Oid {
    let sig = signature();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .unwrap()
}
