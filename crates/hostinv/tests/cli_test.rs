//! Integration tests for the `hostinv` CLI binary.
//!
//! Each test gets its own temporary database created with `hostinv init`,
//! and all `HOSTINV_*` variables are reset so the user's configuration is
//! never read.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

struct Env {
    dir: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("inventory.db")
    }

    /// Build a [`Command`] for the `hostinv` binary with env isolation.
    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("hostinv");
        cmd.env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("HOSTINV_DB", self.db_path())
            .env("HOSTINV_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("HOSTINV_DATABASE__PATH")
            .env_remove("HOSTINV_DATABASE__TABLE")
            .env_remove("HOSTINV_DATABASE__CONNECT_TIMEOUT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn initialised() -> Self {
        let env = Self::new();
        env.cmd().arg("init").assert().success();
        env
    }

    fn add(&self, args: &[&str]) {
        self.cmd().arg("add").args(args).assert().success();
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "{args:?} failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn json(&self, args: &[&str]) -> Value {
        serde_json::from_str(&self.stdout(args)).unwrap()
    }

    /// A fleet of three hosts: two web servers and a database.
    fn fleet() -> Self {
        let env = Self::initialised();
        env.add(&["web1.example.com", "-i", "10.0.0.11", "-g", "web,prod"]);
        env.add(&["web2.example.com", "-i", "10.0.0.12", "-g", "web"]);
        env.add(&["db1.example.com", "-i", "10.0.0.21", "-g", "db,prod", "-f", "backup"]);
        env
    }
}

fn raw_insert(db: &Path, fqdn: &str, ipaddr: &str, groups: Option<&str>, upd: &str) {
    let conn = rusqlite::Connection::open(db).unwrap();
    conn.execute(
        "INSERT INTO server_inventory (fqdn, ipaddr, \"groups\", upd) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![fqdn, ipaddr, groups, upd],
    )
    .unwrap();
}

fn host_count(env: &Env) -> usize {
    env.json(&["get", "host", "all"]).as_object().unwrap().len()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = Env::new().cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected usage in:\n{stderr}");
}

#[test]
fn test_help_flag() {
    Env::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("--list")
            .and(predicate::str::contains("get"))
            .and(predicate::str::contains("add")),
    );
}

#[test]
fn test_version_flag() {
    Env::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hostinv"));
}

#[test]
fn test_completions_bash() {
    Env::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_list_conflicts_with_subcommand() {
    Env::initialised()
        .cmd()
        .args(["--list", "get", "group", "--list"])
        .assert()
        .code(2);
}

#[test]
fn test_group_requires_name_or_list() {
    Env::initialised()
        .cmd()
        .args(["get", "group"])
        .assert()
        .code(2);
}

// ── Store lifecycle ─────────────────────────────────────────────────

#[test]
fn test_list_without_database() {
    let env = Env::new();
    env.cmd()
        .arg("--list")
        .assert()
        .code(7)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("hostinv init"));
    assert!(!env.db_path().exists());
}

#[test]
fn test_empty_inventory() {
    let env = Env::initialised();
    assert_eq!(env.stdout(&["--list"]), "{\"_meta\":{\"hostvars\":{}}}\n");
    assert_eq!(env.stdout(&["get", "group", "--list"]), "");
}

#[test]
fn test_init_is_idempotent() {
    let env = Env::fleet();
    env.cmd().arg("init").assert().success();
    assert_eq!(host_count(&env), 3);
}

// ── Read path ───────────────────────────────────────────────────────

#[test]
fn test_list_document() {
    let env = Env::fleet();
    let out = env.stdout(&["--list"]);
    assert_eq!(out.lines().count(), 1, "expected single-line JSON: {out}");

    let doc: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        doc["web"]["hosts"],
        serde_json::json!(["web1.example.com", "web2.example.com"])
    );
    assert_eq!(
        doc["prod"]["hosts"],
        serde_json::json!(["web1.example.com", "db1.example.com"])
    );

    let vars = &doc["_meta"]["hostvars"]["db1.example.com"];
    assert_eq!(vars["ipaddr"], "10.0.0.21");
    assert_eq!(vars["enabled"], true);
    assert_eq!(vars["features"], serde_json::json!(["backup"]));
    assert_eq!(vars["label"], "");
    assert!(vars.get("fqdn").is_none());
}

#[test]
fn test_get_host_prefix() {
    let env = Env::fleet();
    let vars = env.json(&["get", "host", "web"]);
    let keys: Vec<_> = vars.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|k| k.starts_with("web")));
}

#[test]
fn test_get_host_all() {
    assert_eq!(host_count(&Env::fleet()), 3);
}

#[test]
fn test_get_host_no_match_is_empty() {
    let env = Env::fleet();
    assert_eq!(env.stdout(&["get", "host", "mail"]), "{}\n");
}

#[test]
fn test_host_flag_is_exact() {
    let env = Env::fleet();
    let vars = env.json(&["--host", "web1.example.com"]);
    assert_eq!(vars["ipaddr"], "10.0.0.11");
    assert_eq!(vars["groups"], serde_json::json!(["web", "prod"]));
    assert!(vars.get("web1.example.com").is_none());
    assert_eq!(env.stdout(&["--host", "web1"]), "{}\n");
}

#[test]
fn test_group_list_sorted() {
    let env = Env::fleet();
    assert_eq!(env.stdout(&["get", "group", "--list"]), "db\nprod\nweb\n");
}

#[test]
fn test_group_members_sorted() {
    let env = Env::fleet();
    assert_eq!(
        env.stdout(&["get", "group", "prod"]),
        "db1.example.com\nweb1.example.com\n"
    );
}

#[test]
fn test_missing_group() {
    Env::fleet()
        .cmd()
        .args(["get", "group", "missing-group"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No group matching missing-group"));
}

#[test]
fn test_ipv6_is_expanded() {
    let env = Env::initialised();
    env.add(&["v6.example.com", "-i", "::1"]);
    let vars = env.json(&["get", "host", "v6"]);
    assert_eq!(
        vars["v6.example.com"]["ipaddr"],
        "0000:0000:0000:0000:0000:0000:0000:0001"
    );
}

#[test]
fn test_upd_day_before_month() {
    let env = Env::initialised();
    raw_insert(
        &env.db_path(),
        "old.example.com",
        "10.1.1.1",
        None,
        "2024-03-05 14:07:09",
    );
    let vars = env.json(&["get", "host", "old"]);
    assert_eq!(vars["old.example.com"]["upd"], "2024-05-03 14:07:09");
}

#[test]
fn test_ungrouped_host_only_in_hostvars() {
    let env = Env::initialised();
    raw_insert(&env.db_path(), "lone.example.com", "10.1.1.2", Some(""), "2024-01-01 00:00:00");
    let doc = env.json(&["--list"]);
    let top = doc.as_object().unwrap();
    assert_eq!(top.len(), 1);
    assert!(doc["_meta"]["hostvars"]["lone.example.com"].is_object());
}

#[test]
fn test_bad_stored_address_fails_whole_read() {
    let env = Env::fleet();
    raw_insert(&env.db_path(), "bad.example.com", "10.0.0.300", Some("web"), "2024-01-01 00:00:00");
    env.cmd()
        .arg("--list")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("10.0.0.300"));
}

#[test]
fn test_reserved_group_in_store_fails_read() {
    let env = Env::initialised();
    raw_insert(&env.db_path(), "a.example.com", "10.1.1.3", Some("_meta"), "2024-01-01 00:00:00");
    env.cmd()
        .arg("--list")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn test_padded_stored_address_fails_read() {
    let env = Env::initialised();
    raw_insert(&env.db_path(), "pad.example.com", " 10.1.1.4", None, "2024-01-01 00:00:00");
    env.cmd()
        .args(["get", "host", "all"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

// ── Write path ──────────────────────────────────────────────────────

#[test]
fn test_disabled_flag() {
    let env = Env::initialised();
    env.add(&["on.example.com", "-i", "10.0.0.1"]);
    env.add(&["off.example.com", "-i", "10.0.0.2", "-d"]);
    let vars = env.json(&["get", "host", "all"]);
    assert_eq!(vars["on.example.com"]["enabled"], true);
    assert_eq!(vars["off.example.com"]["enabled"], false);
}

#[test]
fn test_add_label_and_features() {
    let env = Env::initialised();
    env.add(&[
        "app.example.com",
        "-i",
        "10.0.0.5",
        "-l",
        "app server",
        "-f",
        "tls,metrics",
    ]);
    let vars = env.json(&["--host", "app.example.com"]);
    assert_eq!(vars["app.example.com"]["label"], "app server");
    assert_eq!(
        vars["app.example.com"]["features"],
        serde_json::json!(["tls", "metrics"])
    );
    assert_eq!(vars["app.example.com"]["groups"], serde_json::json!([]));
}

#[test]
fn test_unresolvable_host_is_not_added() {
    let env = Env::initialised();
    env.cmd()
        .args(["add", "ghost.invalid"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("ghost.invalid"));
    assert_eq!(host_count(&env), 0);
}

#[test]
fn test_invalid_explicit_address() {
    let env = Env::initialised();
    env.cmd()
        .args(["add", "bad.example.com", "-i", "not-an-ip"])
        .assert()
        .failure();
    assert_eq!(host_count(&env), 0);
}

#[test]
fn test_duplicate_host() {
    let env = Env::fleet();
    env.cmd()
        .args(["add", "web1.example.com", "-i", "10.9.9.9"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(host_count(&env), 3);
}

#[test]
fn test_reserved_group_is_refused() {
    let env = Env::initialised();
    env.cmd()
        .args(["add", "a.example.com", "-i", "10.0.0.1", "-g", "_meta"])
        .assert()
        .code(2);
    assert_eq!(host_count(&env), 0);
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_config_show_defaults() {
    Env::new()
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("table = \"server_inventory\""));
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let env = Env::new();
    env.cmd().args(["config", "init"]).assert().success();
    assert!(env.dir.path().join("config.toml").exists());
    env.cmd().args(["config", "init"]).assert().code(2);
    env.cmd().args(["config", "init", "--force"]).assert().success();
}

#[test]
fn test_config_table_is_honoured() {
    let env = Env::new();
    std::fs::write(
        env.dir.path().join("config.toml"),
        "[database]\ntable = \"fleet\"\n",
    )
    .unwrap();
    env.cmd().arg("init").assert().success();
    env.add(&["web1.example.com", "-i", "10.0.0.11"]);
    assert_eq!(host_count(&env), 1);

    let conn = rusqlite::Connection::open(env.db_path()).unwrap();
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM fleet", [], |row| row.get(0))
        .unwrap();
    assert_eq!(n, 1);
}
