//! Primary layer for running a CgmFlow
//!
//! [`Session`] owns one flow: the current step, the answers, the path taken and whether the user
//! is editing from the summary. It drives the [`engine`](cgmflow_step::engine) and is the only
//! thing that writes the flow's [`Snapshot`] to the persistence store.

mod session;
pub use session::{ Session, EditMode, NextOutcome, STORAGE_KEY };

mod snapshot;
pub use snapshot::{ Snapshot, SnapshotError };

mod completion;
pub use completion::{ CompletionSink, CallbackSink, NoopSink };

mod errors;
pub use errors::Error;
