use crate::domain::SemVer;
use std::collections::HashMap;

/// A tag as listed by the repository host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Opaque commit reference the tag points at
    pub commit: String,
}

impl TagRef {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, commit: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            commit: commit.into(),
        }
    }

    /// Normalized version key for this tag, if it is a semantic version.
    ///
    /// The name is lowercased and a single leading `v` removed
    /// (`V1.2.3-RC.1` -> `1.2.3-rc.1`).
    pub fn normalized_version(&self) -> Option<String> {
        let lowered = self.name.to_lowercase();
        let version = lowered.strip_prefix('v').unwrap_or(&lowered);
        SemVer::parse(version).ok().map(|_| version.to_string())
    }
}

/// Tags that are valid semantic versions, keyed by normalized version string
#[derive(Debug, Clone, Default)]
pub struct KnownVersions {
    by_version: HashMap<String, TagRef>,
}

impl KnownVersions {
    /// Build the set from raw repository tags, silently dropping non-semver names.
    ///
    /// When two tags normalize to the same key the later one wins.
    pub fn from_tags<I>(tags: I) -> Self
    where
        I: IntoIterator<Item = TagRef>,
    {
        let mut by_version = HashMap::new();
        for tag in tags {
            match tag.normalized_version() {
                Some(version) => {
                    by_version.insert(version, tag);
                }
                None => tracing::trace!(tag = %tag.name, "ignoring non-semver tag"),
            }
        }
        KnownVersions { by_version }
    }

    /// Whether a tag already exists for `version` (case-insensitive)
    pub fn contains(&self, version: &str) -> bool {
        self.by_version.contains_key(&version.to_lowercase())
    }

    pub fn get(&self, version: &str) -> Option<&TagRef> {
        self.by_version.get(&version.to_lowercase())
    }

    /// Normalized version strings, in no particular order
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.by_version.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_version.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_version.is_empty()
    }
}
