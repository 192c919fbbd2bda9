use std::sync::Arc;

use crate::errors::Result;
use crate::name::RepositoryName;
use crate::registry::{AdminClient, StoragePruner};

/// How a cleanup invocation resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The repository's storage subtree was removed from disk.
    Pruned,
    /// The repository is no longer in the catalog; nothing left to remove.
    AlreadyGone,
    /// The repository still has live tags; storage left untouched.
    TagsRemain(Vec<String>),
}

/// Orchestrates two-stage cleanup for a repository: garbage collection first,
/// then disk pruning if catalog/tag state shows it is safe.
#[derive(Clone)]
pub struct Cleaner {
    admin: Arc<dyn AdminClient>,
    pruner: Arc<dyn StoragePruner>,
}

impl Cleaner {
    pub fn new(admin: Arc<dyn AdminClient>, pruner: Arc<dyn StoragePruner>) -> Self {
        Self { admin, pruner }
    }

    /// Run garbage collection, then prune the repository's storage subtree if
    /// it is safe to do so.
    ///
    /// Garbage collection always completes (or fails, halting the pipeline)
    /// before any prune decision is evaluated: pruning must never race with
    /// blobs the registry still considers live. The first failure propagates;
    /// there is nothing to roll back, both stages are idempotent.
    pub async fn cleanup(&self, repository: &RepositoryName) -> Result<CleanupOutcome> {
        let summary = self.admin.run_garbage_collect().await?;
        if !summary.stdout.is_empty() {
            tracing::info!(%repository, "garbage collect stdout:\n{}", summary.stdout);
        }
        if !summary.stderr.is_empty() {
            tracing::warn!(%repository, "garbage collect stderr:\n{}", summary.stderr);
        }
        tracing::info!(%repository, "garbage collect successful");

        self.prune_if_safe(repository).await
    }

    /// Decision policy, in order:
    ///
    /// * repository absent from the catalog: already deleted, no-op;
    /// * repository has tags left: a manifest/tag deletion does not imply the
    ///   repository is empty, never touch its storage;
    /// * otherwise remove the subtree. This is the only destructive path in
    ///   the service.
    async fn prune_if_safe(&self, repository: &RepositoryName) -> Result<CleanupOutcome> {
        let catalog = self.admin.get_catalog().await?;
        if !catalog.contains(repository) {
            tracing::info!(%repository, "repository not in catalog, nothing to prune");
            return Ok(CleanupOutcome::AlreadyGone);
        }

        let tags = self.admin.get_tags(repository).await?;
        if !tags.is_empty() {
            tracing::info!(%repository, tags = ?tags.tags, "tags not empty, not pruning");
            return Ok(CleanupOutcome::TagsRemain(tags.tags));
        }

        self.pruner.remove_repository(repository).await?;
        tracing::info!(%repository, "disk cleanup successful");
        Ok(CleanupOutcome::Pruned)
    }
}
