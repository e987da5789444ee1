// hostinv-core: host records in, Ansible-shaped inventory documents out.

pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod normalize;
pub mod select;
pub mod store;
pub mod writer;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DatabaseConfig;
pub use error::CoreError;
pub use inventory::{Inventory, META_KEY};
pub use model::{Host, HostVars};
pub use select::{Document, HostFilter, Request, Selection};
pub use store::{HostInsert, HostStore, RawHostRow};
pub use writer::{HostWriter, NewHost, Resolve, SystemResolver};
