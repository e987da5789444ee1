/// SQL DDL for the host table.
///
/// Column set and defaults mirror what automation already writes: `enabled`
/// defaults to 1 and `upd` to the insert time.
pub fn create_table(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS "{table}" (
    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
    "fqdn" TEXT NOT NULL UNIQUE,
    "enabled" INTEGER NOT NULL DEFAULT 1,
    "features" TEXT,
    "ipaddr" TEXT NOT NULL,
    "label" TEXT,
    "groups" TEXT,
    "upd" TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#
    )
}

pub const PRAGMAS: &str = r"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
";
