pub mod poller;
pub mod snapshot;

pub use poller::{Poller, SourceKind};
pub use snapshot::{Snapshot, SnapshotStore, Stamped};
