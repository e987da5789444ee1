// ── Host entity and its hostvar rendering ──

use std::fmt::Write as _;
use std::net::IpAddr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rendering of `upd` in hostvars. Day precedes month; consumers already
/// parse this layout, so it is kept as is.
pub const UPD_FORMAT: &str = "%Y-%d-%m %H:%M:%S";

/// One inventory-managed machine with storage types already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    pub id: i64,
    /// Canonical name; joins group membership to hostvars.
    pub fqdn: String,
    pub enabled: bool,
    pub ipaddr: IpAddr,
    pub label: String,
    pub groups: Vec<String>,
    pub features: Vec<String>,
    pub upd: NaiveDateTime,
}

/// Per-host attributes as the automation tool sees them: every `Host`
/// field except `fqdn`, which is the key they are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVars {
    pub id: i64,
    pub enabled: bool,
    pub features: Vec<String>,
    pub ipaddr: String,
    pub label: String,
    pub groups: Vec<String>,
    pub upd: String,
}

impl Host {
    pub fn vars(&self) -> HostVars {
        HostVars {
            id: self.id,
            enabled: self.enabled,
            features: self.features.clone(),
            ipaddr: expand_ip(&self.ipaddr),
            label: self.label.clone(),
            groups: self.groups.clone(),
            upd: self.upd.format(UPD_FORMAT).to_string(),
        }
    }
}

/// Fully expanded textual address: dotted quad for IPv4, eight zero-padded
/// hextets for IPv6 (no `::` compression).
pub fn expand_ip(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => {
            let mut out = String::with_capacity(39);
            for (i, segment) in v6.segments().iter().enumerate() {
                if i > 0 {
                    out.push(':');
                }
                let _ = write!(out, "{segment:04x}");
            }
            out
        }
    }
}
