// ── Row-to-domain normalization ──
//
// Turns storage-native `RawHostRow`s into `Host`s: integer booleans become
// `bool`, list columns are decoded, addresses are parsed exactly as stored
// (no trimming). Any bad row fails the whole batch; a partial inventory is
// never produced.

use std::net::IpAddr;

use crate::error::CoreError;
use crate::model::Host;
use crate::store::RawHostRow;
use crate::store::codec::split_list;

fn row_ref(row: &RawHostRow) -> String {
    row.id
        .map_or_else(|| "<null>".into(), |id| format!("{id}"))
}

impl TryFrom<RawHostRow> for Host {
    type Error = CoreError;

    fn try_from(row: RawHostRow) -> Result<Self, Self::Error> {
        let missing = |field: &'static str| CoreError::MissingField {
            field,
            row: row_ref(&row),
        };

        let id = row.id.ok_or_else(|| missing("id"))?;
        let fqdn = row.fqdn.clone().ok_or_else(|| missing("fqdn"))?;
        let upd = row.upd.ok_or_else(|| missing("upd"))?;
        let raw_ip = row.ipaddr.as_deref().ok_or_else(|| missing("ipaddr"))?;

        let ipaddr: IpAddr = raw_ip
            .parse()
            .map_err(|_| CoreError::InvalidAddress {
                fqdn: fqdn.clone(),
                value: raw_ip.to_owned(),
            })?;

        Ok(Host {
            id,
            fqdn,
            // NULL counts as disabled, any non-zero as enabled
            enabled: row.enabled.is_some_and(|v| v != 0),
            ipaddr,
            label: row.label.unwrap_or_default(),
            groups: split_list(row.groups.as_deref()),
            features: split_list(row.features.as_deref()),
            upd,
        })
    }
}

/// Normalize a full table read, failing on the first malformed row.
pub fn normalize_rows(rows: Vec<RawHostRow>) -> Result<Vec<Host>, CoreError> {
    rows.into_iter().map(Host::try_from).collect()
}
