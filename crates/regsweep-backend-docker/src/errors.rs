use std::process::ExitStatus;
use std::time::Duration;

use thiserror;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry api error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("garbage collect exited abnormally ({status}): {stderr}")]
    GarbageCollectFailed {
        status: ExitStatus,
        stderr: String,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("container not found among running containers: {0}")]
    ContainerNotFound(String),

    #[error("storage removal failed: {0}")]
    Storage(std::io::Error),
}

impl From<Error> for regsweep_core::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::GarbageCollectFailed { .. } => {
                regsweep_core::Error::GarbageCollect(format!("{}", e))
            }
            Error::Reqwest(_) => regsweep_core::Error::RegistryApi(format!("{}", e)),
            Error::Storage(_) => regsweep_core::Error::Storage(format!("{}", e)),
            Error::Io(_) | Error::Timeout(_) | Error::ContainerNotFound(_) => {
                regsweep_core::Error::AdminChannel(format!("{}", e))
            }
        }
    }
}
