//! Grid consistency and synchronization
//!
//! ## Modules
//!
//! - `store`: the owner of sections, lines and cells, and every command on them
//! - `events`: change notifications for observers
//! - `snapshot`: read models for the page and the printable export

pub mod events;
pub mod snapshot;
pub mod store;

pub use events::{EventBus, GridEvent, SubscriptionId};
pub use snapshot::{cell_placeholder, GridSnapshot, TableSnapshot};
pub use store::{CellPlacement, GridContents, GridStore};
