//! Database round-trip check
//!
//! Creates a transient SQLite database inside the project directory, runs a
//! create/insert/select cycle against a throwaway table, and removes the
//! file afterwards. The file is removed even when a middle step fails, and
//! stale files left by interrupted runs are cleared up front, so the check
//! is idempotent. Any SQLite error is caught and reported as a failed
//! check, never a crash.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::common::config::DatabaseConfig;
use crate::common::Result;

use super::{CheckInfo, CheckItem, CheckOutcome};

pub const ID: &str = "database";
pub const NAME: &str = "Database";

/// Throwaway table exercised by the round trip
const TEST_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS test_materials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    price REAL NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0
)";

/// Fixture row inserted and selected back
const FIXTURE_NAME: &str = "Test Material";
const FIXTURE_CATEGORY: &str = "Test Category";
const FIXTURE_PRICE: f64 = 99.99;
const FIXTURE_QUANTITY: i64 = 10;

/// Run the database check against `project_dir`
pub fn run(info: &CheckInfo, config: &DatabaseConfig, project_dir: &Path) -> CheckOutcome {
    let db_path = project_dir.join(&config.file);
    let mut items = Vec::new();

    // Interrupted runs may have left a database behind
    if db_path.exists() {
        match std::fs::remove_file(&db_path) {
            Ok(()) => items.push(CheckItem::pass_with("stale database", "removed")),
            Err(e) => {
                items.push(CheckItem::fail("stale database", e.to_string()));
                return CheckOutcome::from_items(info, items);
            }
        }
    }

    let result = round_trip(&db_path, &mut items);

    // The transient file must never survive the check, pass or fail
    if db_path.exists() {
        match std::fs::remove_file(&db_path) {
            Ok(()) => items.push(CheckItem::pass("cleanup")),
            Err(e) => items.push(CheckItem::fail("cleanup", e.to_string())),
        }
    }

    match result {
        Ok(()) => CheckOutcome::from_items(info, items),
        Err(e) => {
            tracing::warn!(error = %e, "database check aborted");
            CheckOutcome::from_error(info, items, &e)
        }
    }
}

/// Create table, insert the fixture row, and select it back
fn round_trip(db_path: &Path, items: &mut Vec<CheckItem>) -> Result<()> {
    let conn = Connection::open(db_path)?;
    items.push(CheckItem::pass_with(
        "open database",
        db_path.display().to_string(),
    ));

    conn.execute(TEST_TABLE_SQL, [])?;
    items.push(CheckItem::pass("create table"));

    conn.execute(
        "INSERT INTO test_materials (name, category, price, quantity) VALUES (?1, ?2, ?3, ?4)",
        params![FIXTURE_NAME, FIXTURE_CATEGORY, FIXTURE_PRICE, FIXTURE_QUANTITY],
    )?;
    items.push(CheckItem::pass("insert row"));

    let row = conn
        .query_row(
            "SELECT name, category, price, quantity FROM test_materials WHERE name = ?1",
            params![FIXTURE_NAME],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((name, category, price, quantity))
            if name == FIXTURE_NAME
                && category == FIXTURE_CATEGORY
                && (price - FIXTURE_PRICE).abs() < f64::EPSILON
                && quantity == FIXTURE_QUANTITY =>
        {
            items.push(CheckItem::pass_with(
                "select row",
                format!("{name} - {price}\u{20ac} - Qty: {quantity}"),
            ));
        }
        Some((name, category, price, quantity)) => {
            items.push(CheckItem::fail(
                "select row",
                format!("unexpected row: {name} / {category} / {price} / {quantity}"),
            ));
        }
        None => {
            items.push(CheckItem::fail("select row", "no row returned"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckStatus;
    use tempfile::tempdir;

    fn test_info() -> CheckInfo {
        CheckInfo {
            id: ID,
            name: NAME,
            description: "",
        }
    }

    fn config() -> DatabaseConfig {
        DatabaseConfig {
            file: "inventory.db".to_string(),
        }
    }

    #[test]
    fn test_round_trip_passes_and_cleans_up() {
        let dir = tempdir().unwrap();
        let outcome = run(&test_info(), &config(), dir.path());

        assert_eq!(outcome.status, CheckStatus::Passed);
        assert!(outcome.error.is_none());
        assert!(!dir.path().join("inventory.db").exists());

        let select = outcome.items.iter().find(|i| i.label == "select row").unwrap();
        assert_eq!(
            select.detail.as_deref(),
            Some("Test Material - 99.99\u{20ac} - Qty: 10")
        );
    }

    #[test]
    fn test_stale_database_is_removed_first() {
        let dir = tempdir().unwrap();
        // A leftover file, not even valid SQLite
        std::fs::write(dir.path().join("inventory.db"), "not a database").unwrap();

        let outcome = run(&test_info(), &config(), dir.path());
        assert_eq!(outcome.status, CheckStatus::Passed);
        assert_eq!(outcome.items[0].label, "stale database");
        assert!(!dir.path().join("inventory.db").exists());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempdir().unwrap();
        let first = run(&test_info(), &config(), dir.path());
        let second = run(&test_info(), &config(), dir.path());

        assert_eq!(first.status, second.status);
        assert_eq!(first.items.len(), second.items.len());
        for (a, b) in first.items.iter().zip(second.items.iter()) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.ok, b.ok);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_readonly_directory_fails_without_panic() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

        // Root ignores directory permissions; nothing to verify then
        let probe = dir.path().join("write-probe");
        if std::fs::write(&probe, "").is_ok() {
            let _ = std::fs::remove_file(&probe);
            std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let outcome = run(&test_info(), &config(), dir.path());
        assert_eq!(outcome.status, CheckStatus::Failed);
        assert!(outcome.error.is_some());

        // Restore so the tempdir can be deleted
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
