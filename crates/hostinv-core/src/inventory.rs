// ── Inventory document builder ──
//
// Folds normalized hosts into the two halves of an Ansible dynamic
// inventory: group -> member fqdns, and fqdn -> hostvars. Both maps keep
// insertion order so output follows the order hosts were read.

use indexmap::IndexMap;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::error::CoreError;
use crate::model::{Host, HostVars};
use crate::normalize::normalize_rows;
use crate::store::HostStore;

/// Top-level key reserved for per-host metadata.
pub const META_KEY: &str = "_meta";

/// Group name -> member fqdns, in first-seen order.
pub type GroupMap = IndexMap<String, Vec<String>>;

/// fqdn -> attributes.
pub type HostvarMap = IndexMap<String, HostVars>;

/// Group membership and hostvars for one snapshot of the host table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    groups: GroupMap,
    hostvars: HostvarMap,
}

#[derive(Serialize)]
struct GroupEntry<'a> {
    hosts: &'a [String],
}

#[derive(Serialize)]
struct Meta<'a> {
    hostvars: &'a HostvarMap,
}

/// Membership per group. Hosts without groups contribute nothing here.
pub fn build_groups(hosts: &[Host]) -> Result<GroupMap, CoreError> {
    let mut groups = GroupMap::new();
    for host in hosts {
        for group in &host.groups {
            if group == META_KEY {
                return Err(CoreError::ReservedGroupInStore {
                    fqdn: host.fqdn.clone(),
                    name: group.clone(),
                });
            }
            groups
                .entry(group.clone())
                .or_default()
                .push(host.fqdn.clone());
        }
    }
    Ok(groups)
}

/// One hostvars entry per host, keyed by fqdn.
pub fn build_hostvars(hosts: &[Host]) -> Result<HostvarMap, CoreError> {
    let mut hostvars = HostvarMap::with_capacity(hosts.len());
    for host in hosts {
        if hostvars.insert(host.fqdn.clone(), host.vars()).is_some() {
            return Err(CoreError::DuplicateHost {
                fqdn: host.fqdn.clone(),
            });
        }
    }
    Ok(hostvars)
}

impl Inventory {
    /// Full read path: fetch every row, normalize, build.
    pub fn load(store: &HostStore) -> Result<Self, CoreError> {
        let hosts = normalize_rows(store.fetch_hosts()?)?;
        Self::from_hosts(&hosts)
    }

    pub fn from_hosts(hosts: &[Host]) -> Result<Self, CoreError> {
        let hostvars = build_hostvars(hosts)?;
        let groups = build_groups(hosts)?;
        tracing::debug!(
            hosts = hostvars.len(),
            groups = groups.len(),
            "inventory built"
        );
        Ok(Self { groups, hostvars })
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn hostvars(&self) -> &HostvarMap {
        &self.hostvars
    }

    pub fn into_parts(self) -> (GroupMap, HostvarMap) {
        (self.groups, self.hostvars)
    }
}

/// Serializes as the full inventory document:
/// `{"<group>": {"hosts": [...]}, ..., "_meta": {"hostvars": {...}}}`.
impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        for (name, members) in &self.groups {
            map.serialize_entry(name, &GroupEntry { hosts: members })?;
        }
        map.serialize_entry(
            META_KEY,
            &Meta {
                hostvars: &self.hostvars,
            },
        )?;
        map.end()
    }
}
