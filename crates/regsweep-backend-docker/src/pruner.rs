use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use regsweep_core::registry::StoragePruner;
use regsweep_core::RepositoryName;

use crate::errors::Error;

/// Removes repository subtrees beneath the registry's storage root.
///
/// Only ever handed a validated [`RepositoryName`], so the joined path cannot
/// escape `<root>/repositories/`.
#[derive(Clone, Debug)]
pub struct FsPruner {
    root: PathBuf,
}

impl FsPruner {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn repository_path(&self, repository: &RepositoryName) -> PathBuf {
        self.root.join("repositories").join(repository.as_str())
    }
}

#[async_trait]
impl StoragePruner for FsPruner {
    async fn remove_repository(&self, repository: &RepositoryName) -> regsweep_core::Result<()> {
        let path = self.repository_path(repository);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => {
                tracing::info!(%repository, path = %path.display(), "removed directory");
                Ok(())
            }
            // a concurrent delivery may have removed it already
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(e).into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn repo(name: &str) -> RepositoryName {
        RepositoryName::try_from(name).unwrap()
    }

    fn populate(root: &std::path::Path, name: &str) -> PathBuf {
        let dir = root.join("repositories").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("link"), b"sha256:meow").unwrap();
        dir
    }

    #[tokio::test]
    async fn removes_repository_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = populate(tmp.path(), "app/web");
        let pruner = FsPruner::new(tmp.path().to_path_buf());

        pruner.remove_repository(&repo("app/web")).await.unwrap();

        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn leaves_sibling_repositories_alone() {
        let tmp = tempfile::tempdir().unwrap();
        populate(tmp.path(), "app/web");
        let sibling = populate(tmp.path(), "app/worker");
        let pruner = FsPruner::new(tmp.path().to_path_buf());

        pruner.remove_repository(&repo("app/web")).await.unwrap();

        assert!(sibling.exists());
    }

    #[tokio::test]
    async fn removing_an_absent_repository_succeeds() {
        let tmp = tempfile::tempdir().unwrap();
        let pruner = FsPruner::new(tmp.path().to_path_buf());

        pruner.remove_repository(&repo("app/web")).await.unwrap();
        pruner.remove_repository(&repo("app/web")).await.unwrap();
    }
}
