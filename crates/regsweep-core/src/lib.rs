//! # regsweep core
//!
//! Domain types and orchestration logic for the registry cleanup service,
//! independent of any concrete transport or runtime. The interesting part
//! lives in [`Cleaner`]: the ordering and safety checks that decide whether a
//! repository's storage subtree may actually be deleted after a registry
//! deletion event.
//!
//! Concrete implementations of the [`registry::AdminClient`] and
//! [`registry::StoragePruner`] seams live in backend crates (see
//! `regsweep_backend_docker`); the webhook surface lives in `regsweep_http`.

pub mod errors;
pub use errors::{Error, Result};

mod name;
pub use name::RepositoryName;

mod notification;
pub use notification::{Event, EventTarget, Notification, DELETE_ACTION};

pub mod registry;

mod cleaner;
pub use cleaner::{Cleaner, CleanupOutcome};
