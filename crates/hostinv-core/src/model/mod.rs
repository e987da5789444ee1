// ── Domain model ──

pub mod host;

pub use host::{Host, HostVars, UPD_FORMAT, expand_ip};
