use thiserror;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid repository name: {0}")]
    InvalidRepositoryName(String),

    #[error("admin channel error: {0}")]
    AdminChannel(String),

    #[error("garbage collect failed: {0}")]
    GarbageCollect(String),

    #[error("registry api error: {0}")]
    RegistryApi(String),

    #[error("storage error: {0}")]
    Storage(String),
}
