// ── Host writer ──
//
// Validates a candidate host, fills in its address by forward lookup when
// none was given, and inserts it. Nothing reaches the store unless every
// check and the lookup succeed.

use std::net::{IpAddr, ToSocketAddrs};

use tracing::{debug, info};

use crate::error::CoreError;
use crate::inventory::META_KEY;
use crate::store::{HostInsert, HostStore};

/// Forward name resolution.
pub trait Resolve {
    fn resolve(&self, fqdn: &str) -> Result<IpAddr, CoreError>;
}

/// Resolver backed by the operating system, preferring IPv4 answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, fqdn: &str) -> Result<IpAddr, CoreError> {
        let failed = |reason: String| CoreError::ResolutionFailed {
            fqdn: fqdn.to_owned(),
            reason,
        };

        let addrs: Vec<IpAddr> = (fqdn, 0)
            .to_socket_addrs()
            .map_err(|e| failed(e.to_string()))?
            .map(|addr| addr.ip())
            .collect();

        addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| failed("no addresses returned".into()))
    }
}

/// A host as requested by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHost {
    pub fqdn: String,
    pub ipaddr: Option<String>,
    /// Comma-delimited group names.
    pub groups: Option<String>,
    /// Comma-delimited feature flags.
    pub features: Option<String>,
    pub label: Option<String>,
    pub disabled: bool,
}

fn validate_fqdn(fqdn: &str) -> Result<(), CoreError> {
    if fqdn.is_empty() {
        return Err(CoreError::Validation {
            message: "host name must not be empty".into(),
        });
    }
    if fqdn.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(CoreError::Validation {
            message: format!("invalid host name '{fqdn}'"),
        });
    }
    Ok(())
}

/// Split a comma-delimited option, trimming entries and dropping empties.
/// Yields `None` when nothing is left, so the column keeps its default.
fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    (!items.is_empty()).then_some(items)
}

pub struct HostWriter<'a, R> {
    store: &'a HostStore,
    resolver: R,
}

impl<'a, R: Resolve> HostWriter<'a, R> {
    pub fn new(store: &'a HostStore, resolver: R) -> Self {
        Self { store, resolver }
    }

    /// Validate `new` and resolve its address, without touching the store.
    pub fn prepare(&self, new: NewHost) -> Result<HostInsert, CoreError> {
        validate_fqdn(&new.fqdn)?;

        let groups = parse_list(new.groups.as_deref());
        if let Some(reserved) = groups.iter().flatten().find(|g| *g == META_KEY) {
            return Err(CoreError::ReservedGroupName {
                name: reserved.clone(),
            });
        }
        let features = parse_list(new.features.as_deref());

        let ipaddr = match new.ipaddr.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                raw.parse().map_err(|_| CoreError::InvalidAddress {
                    fqdn: new.fqdn.clone(),
                    value: raw.to_owned(),
                })?
            }
            _ => {
                let ip = self.resolver.resolve(&new.fqdn)?;
                debug!(fqdn = %new.fqdn, %ip, "resolved host address");
                ip
            }
        };

        Ok(HostInsert {
            fqdn: new.fqdn,
            ipaddr,
            groups,
            features,
            label: new.label.filter(|l| !l.is_empty()),
            enabled: new.disabled.then_some(false),
        })
    }

    /// Validate, resolve and insert. Returns the new row id.
    pub fn add(&self, new: NewHost) -> Result<i64, CoreError> {
        let insert = self.prepare(new)?;
        let id = self.store.insert_host(&insert)?;
        info!(id, fqdn = %insert.fqdn, ip = %insert.ipaddr, "host added");
        Ok(id)
    }
}
