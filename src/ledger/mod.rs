//! Spending ledger for per-call USD costs.
//!
//! Records every completed paid call in a local SQLite ledger keyed by the
//! local calendar day, and enforces an optional standing budget ceiling
//! before a call is attempted.
//!
//! ## Design
//! - One row per completed call; day totals are `SUM`/`COUNT` over today's
//!   rows, so the per-day invariants hold by construction
//! - The budget ceiling is a standing policy, not per-day: day rollover
//!   resets spent/calls to zero but leaves the limit in place until
//!   explicitly cleared
//! - The day key is derived at the moment of each operation; a call that
//!   spans midnight is recorded under the day `record` runs
//! - Old-day rows are kept indefinitely as an audit trail (one row per
//!   paid call; the file stays small)
//! - No cross-process locking: concurrent invocations interleave at
//!   SQLite statement granularity

pub mod clock;

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

pub use clock::{Clock, SystemClock};

use crate::error::{Error, Result};

/// Ledger file name under the per-user data directory.
pub const LEDGER_FILE: &str = "ledger.db";

/// Result of a pre-call budget check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    /// Whether another paid call may proceed.
    pub within_budget: bool,
    /// `limit - spent`, or `None` when no limit is set. Unclamped: once
    /// the ceiling has been crossed this goes negative.
    pub remaining: Option<f64>,
}

/// Spending ledger with SQLite persistence.
///
/// State is loaded fresh from disk by each operation and every mutation is
/// flushed before the call returns; nothing is cached across invocations.
pub struct SpendingLedger {
    conn: Connection,
    clock: Box<dyn Clock>,
}

impl SpendingLedger {
    /// Open (or lazily create) the ledger at `path` on the system clock.
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_clock(path, Box::new(SystemClock))
    }

    /// Open with an explicit day source. Tests use this to simulate
    /// rollover.
    pub fn with_clock(path: &Path, clock: Box<dyn Clock>) -> Result<Self> {
        Self::from_connection(Connection::open(path)?, clock)
    }

    /// Ledger backed by an in-memory database.
    pub fn in_memory(clock: Box<dyn Clock>) -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, clock)
    }

    fn from_connection(conn: Connection, clock: Box<dyn Clock>) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS ledger_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day TEXT NOT NULL,
                model TEXT NOT NULL,
                cost_usd REAL NOT NULL DEFAULT 0.0,
                recorded_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            CREATE INDEX IF NOT EXISTS idx_ledger_entries_day ON ledger_entries(day);
            CREATE TABLE IF NOT EXISTS budget_limit (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                limit_usd REAL NOT NULL
            );",
        )?;
        Ok(Self { conn, clock })
    }

    /// Today's key in the form the `day` column uses, e.g. `2024-06-01`.
    fn today_key(&self) -> String {
        self.clock.today().format("%Y-%m-%d").to_string()
    }

    /// Append one completed call under the current calendar day.
    ///
    /// The caller is trusted to supply the accurate post-call cost; this is
    /// an accounting record, not a payment authority. A failed call must
    /// not be recorded.
    pub fn record(&self, model: &str, cost_usd: f64) -> Result<()> {
        if !cost_usd.is_finite() || cost_usd < 0.0 {
            return Err(Error::Validation {
                field: "cost",
                reason: format!("cost must be a non-negative USD amount, got {cost_usd}"),
            });
        }

        let day = self.today_key();
        self.conn.execute(
            "INSERT INTO ledger_entries (day, model, cost_usd) VALUES (?1, ?2, ?3)",
            params![day, model, cost_usd],
        )?;

        tracing::info!(day = %day, model = %model, cost_usd, "cost recorded");
        Ok(())
    }

    /// Pre-call budget check. Read-only; call before attempting a paid
    /// call. With no limit set the result is unconstrained.
    pub fn check_budget(&self) -> Result<BudgetStatus> {
        let Some(limit) = self.get_limit()? else {
            return Ok(BudgetStatus {
                within_budget: true,
                remaining: None,
            });
        };

        let spent = self.get_total()?;
        Ok(BudgetStatus {
            within_budget: spent < limit,
            remaining: Some(limit - spent),
        })
    }

    /// Total USD recorded under today's key.
    pub fn get_total(&self) -> Result<f64> {
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(cost_usd), 0.0) FROM ledger_entries WHERE day = ?1",
            params![self.today_key()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Number of calls recorded under today's key.
    pub fn get_calls(&self) -> Result<i64> {
        let calls = self.conn.query_row(
            "SELECT COUNT(*) FROM ledger_entries WHERE day = ?1",
            params![self.today_key()],
            |row| row.get(0),
        )?;
        Ok(calls)
    }

    /// The standing budget limit, or `None` when unset.
    pub fn get_limit(&self) -> Result<Option<f64>> {
        let limit = self
            .conn
            .query_row(
                "SELECT limit_usd FROM budget_limit WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(limit)
    }

    /// Set the standing budget limit. Does not reset today's spent total.
    pub fn set_budget(&self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::Validation {
                field: "budget",
                reason: format!("budget must be a positive USD amount, got {amount}"),
            });
        }

        self.conn.execute(
            "INSERT OR REPLACE INTO budget_limit (id, limit_usd) VALUES (1, ?1)",
            params![amount],
        )?;

        tracing::info!(limit_usd = amount, "standing budget set");
        Ok(())
    }

    /// Remove the standing limit; future budget checks are unconstrained.
    pub fn clear_budget(&self) -> Result<()> {
        self.conn.execute("DELETE FROM budget_limit WHERE id = 1", [])?;
        tracing::info!("standing budget cleared");
        Ok(())
    }

    /// Budget-exceeded error carrying today's context, for pre-call
    /// refusal messages.
    pub fn exceeded(&self) -> Result<Error> {
        Ok(Error::BudgetExceeded {
            spent: self.get_total()?,
            limit: self.get_limit()?.unwrap_or(0.0),
            calls: self.get_calls()?,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;

    /// Settable day source shared between the test and the ledger.
    #[derive(Clone)]
    struct TestClock {
        today: Arc<Mutex<NaiveDate>>,
    }

    impl TestClock {
        fn new(date: &str) -> Self {
            Self {
                today: Arc::new(Mutex::new(date.parse().unwrap())),
            }
        }

        fn set(&self, date: &str) {
            *self.today.lock().unwrap() = date.parse().unwrap();
        }
    }

    impl Clock for TestClock {
        fn today(&self) -> NaiveDate {
            *self.today.lock().unwrap()
        }
    }

    fn make_ledger() -> (TestClock, SpendingLedger) {
        let clock = TestClock::new("2024-06-01");
        let ledger = SpendingLedger::in_memory(Box::new(clock.clone())).unwrap();
        (clock, ledger)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn record_accumulates_totals_and_calls() {
        let (_clock, ledger) = make_ledger();

        ledger.record("openai/gpt-4o", 0.0123).unwrap();
        ledger.record("xai/grok-3", 0.02).unwrap();

        assert_close(ledger.get_total().unwrap(), 0.0323);
        assert_eq!(ledger.get_calls().unwrap(), 2);
    }

    #[test]
    fn record_rejects_negative_cost() {
        let (_clock, ledger) = make_ledger();

        let result = ledger.record("m", -0.01);
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(ledger.get_calls().unwrap(), 0);
    }

    #[test]
    fn no_limit_is_unconstrained() {
        let (_clock, ledger) = make_ledger();
        ledger.record("m", 5.0).unwrap();

        let status = ledger.check_budget().unwrap();
        assert!(status.within_budget);
        assert_eq!(status.remaining, None);
    }

    #[test]
    fn budget_enforcement_scenario() {
        let (_clock, ledger) = make_ledger();
        ledger.set_budget(1.00).unwrap();

        ledger.record("m", 0.60).unwrap();
        let status = ledger.check_budget().unwrap();
        assert!(status.within_budget);
        assert_close(status.remaining.unwrap(), 0.40);

        ledger.record("m", 0.50).unwrap();
        let status = ledger.check_budget().unwrap();
        assert!(!status.within_budget);
        assert_close(status.remaining.unwrap(), -0.10);
    }

    #[test]
    fn check_budget_is_idempotent() {
        let (_clock, ledger) = make_ledger();
        ledger.set_budget(2.0).unwrap();
        ledger.record("m", 0.75).unwrap();

        let first = ledger.check_budget().unwrap();
        let second = ledger.check_budget().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn day_rollover_resets_totals_but_not_limit() {
        let (clock, ledger) = make_ledger();
        ledger.set_budget(3.0).unwrap();
        ledger.record("m", 2.5).unwrap();

        clock.set("2024-06-02");

        assert_close(ledger.get_total().unwrap(), 0.0);
        assert_eq!(ledger.get_calls().unwrap(), 0);
        assert_eq!(ledger.get_limit().unwrap(), Some(3.0));

        let status = ledger.check_budget().unwrap();
        assert!(status.within_budget);
        assert_close(status.remaining.unwrap(), 3.0);
    }

    #[test]
    fn day_key_is_taken_at_record_time() {
        let (clock, ledger) = make_ledger();
        let before_midnight = ledger.check_budget().unwrap();
        assert!(before_midnight.within_budget);

        // The call completes after midnight; the entry lands on the new day.
        clock.set("2024-06-02");
        ledger.record("m", 0.30).unwrap();

        assert_eq!(ledger.get_calls().unwrap(), 1);
        clock.set("2024-06-01");
        assert_eq!(ledger.get_calls().unwrap(), 0);
    }

    #[test]
    fn clear_budget_returns_to_unconstrained() {
        let (_clock, ledger) = make_ledger();
        ledger.set_budget(0.10).unwrap();
        ledger.record("m", 5.0).unwrap();
        assert!(!ledger.check_budget().unwrap().within_budget);

        ledger.clear_budget().unwrap();
        let status = ledger.check_budget().unwrap();
        assert!(status.within_budget);
        assert_eq!(status.remaining, None);
        assert_eq!(ledger.get_limit().unwrap(), None);
    }

    #[test]
    fn set_budget_rejects_non_positive_amounts() {
        let (_clock, ledger) = make_ledger();
        ledger.set_budget(1.5).unwrap();

        assert!(matches!(
            ledger.set_budget(0.0),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            ledger.set_budget(-5.0),
            Err(Error::Validation { .. })
        ));

        // Rejected updates leave the standing limit untouched.
        assert_eq!(ledger.get_limit().unwrap(), Some(1.5));
    }

    #[test]
    fn set_budget_does_not_reset_spent() {
        let (_clock, ledger) = make_ledger();
        ledger.record("m", 0.80).unwrap();
        ledger.set_budget(1.0).unwrap();

        assert_close(ledger.get_total().unwrap(), 0.80);
        let status = ledger.check_budget().unwrap();
        assert_close(status.remaining.unwrap(), 0.20);
    }

    #[test]
    fn state_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(LEDGER_FILE);
        let clock = TestClock::new("2024-06-01");

        {
            let ledger =
                SpendingLedger::with_clock(&path, Box::new(clock.clone())).unwrap();
            ledger.set_budget(2.0).unwrap();
            ledger.record("openai/gpt-4o", 0.45).unwrap();
        }

        let ledger = SpendingLedger::with_clock(&path, Box::new(clock)).unwrap();
        assert_close(ledger.get_total().unwrap(), 0.45);
        assert_eq!(ledger.get_calls().unwrap(), 1);
        assert_eq!(ledger.get_limit().unwrap(), Some(2.0));
    }

    #[test]
    fn exceeded_error_carries_context() {
        let (_clock, ledger) = make_ledger();
        ledger.set_budget(1.0).unwrap();
        ledger.record("m", 1.25).unwrap();

        let err = ledger.exceeded().unwrap();
        match err {
            Error::BudgetExceeded {
                spent,
                limit,
                calls,
            } => {
                assert_close(spent, 1.25);
                assert_close(limit, 1.0);
                assert_eq!(calls, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
