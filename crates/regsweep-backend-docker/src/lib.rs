//! # regsweep docker backend
//!
//! Concrete implementations of the `regsweep_core` registry seams for a
//! registry running in a local docker container: garbage collection via
//! `docker exec`, catalog/tag reads via the registry's v2 HTTP API, and
//! storage pruning on the local filesystem.

mod errors;
pub use errors::{Error, Result};

mod config;
pub use config::DockerBackendConfig;

mod admin;
pub use admin::DockerAdminClient;

mod pruner;
pub use pruner::FsPruner;
