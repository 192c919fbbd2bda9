//! # Registry Abstractions
//!
//! Defines the interoperability layer between the cleanup orchestrator and
//! backend implementations of the registry's administrative surfaces.
//!
//! ## Known Implementations
//!
//! ### regsweep_backend_docker
//!
//! Runs garbage collection with `docker exec` against the registry container,
//! reads catalog/tag state over the registry's v2 HTTP API, and prunes
//! repository subtrees on the local filesystem.
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::errors::Result;
use crate::name::RepositoryName;

/// The set of repository names known to the registry at query time.
///
/// Always fetched fresh at the moment of a prune decision; a stale catalog
/// would make deletion unsafe.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub repositories: Vec<String>,
}

impl Catalog {
    pub fn contains(&self, repository: &RepositoryName) -> bool {
        self.repositories.iter().any(|r| r == repository.as_str())
    }
}

/// Tags currently held by a single repository. The registry reports a tagless
/// repository as `"tags": null`, which decodes as empty here.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TagList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl TagList {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Serde deserialization decorator to map JSON `null` to an empty Vec.
fn null_as_empty<'de, D>(de: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<Vec<String>>::deserialize(de)?;
    Ok(opt.unwrap_or_default())
}

/// Output streams captured from a garbage-collect run, kept for operator
/// logging regardless of outcome.
#[derive(Clone, Debug, Default)]
pub struct GcSummary {
    pub stdout: String,
    pub stderr: String,
}

/// Administrative surface of the registry: command execution inside its
/// managed runtime plus read-only catalog/tag queries.
#[async_trait]
pub trait AdminClient: Send + Sync + 'static {
    /// Run the registry's own garbage collector, capturing its output. An
    /// abnormal exit status is an error, not merely a channel failure.
    async fn run_garbage_collect(&self) -> Result<GcSummary>;

    /// Fetch the current catalog of repository names.
    async fn get_catalog(&self) -> Result<Catalog>;

    /// Fetch the current tag list for a repository.
    async fn get_tags(&self, repository: &RepositoryName) -> Result<TagList>;
}

/// Deletes a repository's storage subtree.
#[async_trait]
pub trait StoragePruner: Send + Sync + 'static {
    /// Remove the repository's subtree recursively. Removing an already
    /// absent subtree is a success; [`crate::Cleaner`] depends on this
    /// idempotence under concurrent deliveries.
    async fn remove_repository(&self, repository: &RepositoryName) -> Result<()>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catalog_membership() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"repositories":["app/web","library/ubuntu"]}"#).unwrap();
        let present = RepositoryName::try_from("app/web").unwrap();
        let absent = RepositoryName::try_from("app/worker").unwrap();
        assert!(catalog.contains(&present));
        assert!(!catalog.contains(&absent));
    }

    #[test]
    fn tag_list_decodes_null_as_empty() {
        let tags: TagList = serde_json::from_str(r#"{"name":"app/web","tags":null}"#).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn tag_list_decodes_missing_as_empty() {
        let tags: TagList = serde_json::from_str(r#"{"name":"app/web"}"#).unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn tag_list_decodes_tags() {
        let tags: TagList =
            serde_json::from_str(r#"{"name":"app/web","tags":["latest","v1.2"]}"#).unwrap();
        assert_eq!(tags.tags, vec!["latest", "v1.2"]);
    }
}
