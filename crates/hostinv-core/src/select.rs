// ── Request selection ──
//
// Maps a parsed request onto a slice of the built inventory. The result is
// tagged by shape: documents render as single-line JSON, lists as sorted
// plain text, one element per line.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::error::CoreError;
use crate::inventory::{HostvarMap, Inventory};
use crate::model::HostVars;

/// Sentinel host name meaning "every host".
pub const ALL_HOSTS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostFilter {
    All,
    /// Case-sensitive `starts_with` on fqdn.
    Prefix(String),
}

impl HostFilter {
    /// Interpret a user-supplied host name, honouring the `all` sentinel.
    pub fn from_name(name: &str) -> Self {
        if name == ALL_HOSTS {
            Self::All
        } else {
            Self::Prefix(name.to_owned())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// The full inventory document (`--list`).
    Inventory,
    /// Hostvars for hosts matching a filter (`get host`).
    Hosts(HostFilter),
    /// Hostvars of exactly one host, `{}` if unknown (`--host`).
    Host(String),
    /// Every group name (`get group --list`).
    GroupList,
    /// Members of one group, matched exactly (`get group`).
    Group(String),
}

/// Mapping-shaped results.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Inventory(Inventory),
    Hostvars(HostvarMap),
    /// Bare vars of a single host; `None` renders as `{}`.
    Host(Option<HostVars>),
}

impl Serialize for Document {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Inventory(inv) => inv.serialize(serializer),
            Self::Hostvars(vars) => vars.serialize(serializer),
            Self::Host(Some(vars)) => vars.serialize(serializer),
            Self::Host(None) => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Document(Document),
    List(Vec<String>),
}

impl Selection {
    /// Render for stdout. Lists come out sorted; an empty list is an empty
    /// string.
    pub fn render(&self) -> Result<String, CoreError> {
        match self {
            Self::Document(doc) => Ok(serde_json::to_string(doc)?),
            Self::List(items) => {
                let mut sorted = items.clone();
                sorted.sort();
                Ok(sorted.join("\n"))
            }
        }
    }
}

/// Answer `request` from a built inventory.
pub fn select(inventory: Inventory, request: &Request) -> Result<Selection, CoreError> {
    let selection = match request {
        Request::Inventory => Selection::Document(Document::Inventory(inventory)),
        Request::Hosts(HostFilter::All) => {
            let (_, hostvars) = inventory.into_parts();
            Selection::Document(Document::Hostvars(hostvars))
        }
        Request::Hosts(HostFilter::Prefix(prefix)) => {
            let (_, mut hostvars) = inventory.into_parts();
            hostvars.retain(|fqdn, _| fqdn.starts_with(prefix.as_str()));
            Selection::Document(Document::Hostvars(hostvars))
        }
        Request::Host(fqdn) => {
            let (_, mut hostvars) = inventory.into_parts();
            Selection::Document(Document::Host(hostvars.swap_remove(fqdn.as_str())))
        }
        Request::GroupList => {
            let (groups, _) = inventory.into_parts();
            Selection::List(groups.into_keys().collect())
        }
        Request::Group(name) => {
            let (mut groups, _) = inventory.into_parts();
            let members = groups
                .swap_remove(name.as_str())
                .ok_or_else(|| CoreError::GroupNotFound { name: name.clone() })?;
            Selection::List(members)
        }
    };
    Ok(selection)
}
