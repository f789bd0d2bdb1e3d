//! Memo store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/get/delete over the single `memos` table.
//! - Establish the connection idempotently on first use and reuse it.
//!
//! # Invariants
//! - At most one connection attempt is in flight at any time; concurrent
//!   callers during initialization all observe the outcome of that single
//!   attempt.
//! - A failed initialization leaves the store retryable, never wedged.
//! - Each operation runs inside its own transaction; no transaction is held
//!   across operations.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::memo::{Memo, MemoId, MemoValidationError};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

const MEMO_SELECT_SQL: &str = "SELECT id, title, content, url, created_at FROM memos";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error distinguishing the failing phase per operation.
#[derive(Debug)]
pub enum StoreError {
    /// The database could not be opened or migrated.
    Open(DbError),
    /// A transaction failed to begin, execute or commit.
    Transaction {
        operation: &'static str,
        source: rusqlite::Error,
    },
    /// The memo failed field-level validation before persistence.
    Validation(MemoValidationError),
    /// A persisted row violates model invariants.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "memo store could not be opened: {err}"),
            Self::Transaction { operation, source } => {
                write!(f, "memo store {operation} transaction failed: {source}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Transaction { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Open(value)
    }
}

impl From<MemoValidationError> for StoreError {
    fn from(value: MemoValidationError) -> Self {
        Self::Validation(value)
    }
}

fn tx_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
    move |source| StoreError::Transaction { operation, source }
}

/// Persistence contract consumed by the service layer.
///
/// "Not found" is a value on the read path and a no-op on the delete path;
/// only connection and transaction faults surface as errors.
pub trait MemoRepository {
    /// Persists an unsaved memo and returns the store-assigned id.
    fn create(&self, memo: &Memo) -> StoreResult<MemoId>;
    /// Returns every stored memo, newest first.
    fn list_all(&self) -> StoreResult<Vec<Memo>>;
    /// Returns the memo with `id`, or `None` when absent.
    fn get_by_id(&self, id: MemoId) -> StoreResult<Option<Memo>>;
    /// Removes the memo with `id`; succeeds even when `id` does not exist.
    fn delete_by_id(&self, id: MemoId) -> StoreResult<()>;
}

impl<R: MemoRepository + ?Sized> MemoRepository for &R {
    fn create(&self, memo: &Memo) -> StoreResult<MemoId> {
        (**self).create(memo)
    }

    fn list_all(&self) -> StoreResult<Vec<Memo>> {
        (**self).list_all()
    }

    fn get_by_id(&self, id: MemoId) -> StoreResult<Option<Memo>> {
        (**self).get_by_id(id)
    }

    fn delete_by_id(&self, id: MemoId) -> StoreResult<()> {
        (**self).delete_by_id(id)
    }
}

/// Connection lifecycle tracked explicitly instead of a module singleton.
#[derive(Debug)]
enum StoreState {
    /// No connection attempt has succeeded yet.
    Uninitialized,
    /// Connection established, migrations applied.
    Ready(Connection),
    /// Explicitly closed; the next operation re-runs initialization.
    Closed,
}

#[derive(Debug, Clone)]
enum StoreBackend {
    File(PathBuf),
    Memory,
}

/// SQLite-backed memo store owning its connection lifecycle.
///
/// Constructed once per process and passed by reference to consumers.
/// Construction is cheap and touches no storage; the connection is opened
/// lazily by [`MemoStore::initialize`] or by the first operation.
#[derive(Debug)]
pub struct MemoStore {
    backend: StoreBackend,
    state: Mutex<StoreState>,
}

impl MemoStore {
    /// Describes a file-backed store at `path` without opening it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StoreBackend::File(path.into()),
            state: Mutex::new(StoreState::Uninitialized),
        }
    }

    /// Describes an in-memory store, used by tests and the CLI probe.
    ///
    /// A closed in-memory store starts empty again on the next operation.
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            state: Mutex::new(StoreState::Uninitialized),
        }
    }

    /// Idempotently establishes the connection and applies migrations.
    ///
    /// Concurrent callers serialize on the state lock, so the first caller
    /// performs the single connection attempt and every later caller reuses
    /// its outcome. On failure the state is left uninitialized and a later
    /// call retries cleanly.
    pub fn initialize(&self) -> StoreResult<()> {
        self.with_connection(|_| Ok(()))
    }

    /// Returns whether a ready connection is currently held.
    pub fn is_ready(&self) -> bool {
        let state = self.lock_state();
        matches!(&*state, StoreState::Ready(_))
    }

    /// Drops the connection; any later operation re-runs initialization.
    pub fn close(&self) -> StoreResult<()> {
        let mut state = self.lock_state();
        match std::mem::replace(&mut *state, StoreState::Closed) {
            StoreState::Ready(conn) => {
                if let Err((conn, err)) = conn.close() {
                    *state = StoreState::Ready(conn);
                    return Err(StoreError::Transaction {
                        operation: "close",
                        source: err,
                    });
                }
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Guarded accessor every operation funnels through: initializes on
    /// first use, after `close()`, and after a failed attempt.
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut state = self.lock_state();
        match &mut *state {
            StoreState::Ready(conn) => f(conn),
            slot => {
                let mut conn = match &self.backend {
                    StoreBackend::File(path) => open_db(path)?,
                    StoreBackend::Memory => open_db_in_memory()?,
                };
                let result = f(&mut conn);
                *slot = StoreState::Ready(conn);
                result
            }
        }
    }
}

impl MemoRepository for MemoStore {
    fn create(&self, memo: &Memo) -> StoreResult<MemoId> {
        if let Some(id) = memo.id {
            return Err(MemoValidationError::IdAlreadyAssigned(id).into());
        }
        memo.validate()?;

        self.with_connection(|conn| {
            let tx = conn.transaction().map_err(tx_error("create"))?;
            tx.execute(
                "INSERT INTO memos (title, content, url, created_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    memo.title.as_str(),
                    memo.content.as_str(),
                    memo.url.as_str(),
                    memo.created_at.as_str(),
                ],
            )
            .map_err(tx_error("create"))?;
            let id = tx.last_insert_rowid();
            tx.commit().map_err(tx_error("create"))?;

            info!("event=memo_create module=store status=ok id={id}");
            Ok(id)
        })
    }

    fn list_all(&self) -> StoreResult<Vec<Memo>> {
        self.with_connection(|conn| {
            let tx = conn.transaction().map_err(tx_error("list_all"))?;
            let mut memos = Vec::new();
            {
                let mut stmt = tx
                    .prepare(&format!("{MEMO_SELECT_SQL};"))
                    .map_err(tx_error("list_all"))?;
                let mut rows = stmt.query([]).map_err(tx_error("list_all"))?;
                while let Some(row) = rows.next().map_err(tx_error("list_all"))? {
                    memos.push(parse_memo_row("list_all", row)?);
                }
            }
            tx.commit().map_err(tx_error("list_all"))?;

            // Newest first by instant, later insert first on equal instants.
            // The TEXT column compares lexicographically, which disagrees
            // with chronological order across UTC offsets and sub-second
            // precision, so ordering happens on parsed timestamps.
            memos.sort_by_key(|memo| {
                Reverse((
                    memo.created_at_instant().unwrap_or(DateTime::<Utc>::MIN_UTC),
                    memo.id,
                ))
            });

            debug!(
                "event=memo_list module=store status=ok count={}",
                memos.len()
            );
            Ok(memos)
        })
    }

    fn get_by_id(&self, id: MemoId) -> StoreResult<Option<Memo>> {
        self.with_connection(|conn| {
            let tx = conn.transaction().map_err(tx_error("get_by_id"))?;
            let memo = {
                let mut stmt = tx
                    .prepare(&format!("{MEMO_SELECT_SQL} WHERE id = ?1;"))
                    .map_err(tx_error("get_by_id"))?;
                let mut rows = stmt.query([id]).map_err(tx_error("get_by_id"))?;
                match rows.next().map_err(tx_error("get_by_id"))? {
                    Some(row) => Some(parse_memo_row("get_by_id", row)?),
                    None => None,
                }
            };
            tx.commit().map_err(tx_error("get_by_id"))?;

            debug!(
                "event=memo_get module=store status=ok id={id} found={}",
                memo.is_some()
            );
            Ok(memo)
        })
    }

    fn delete_by_id(&self, id: MemoId) -> StoreResult<()> {
        self.with_connection(|conn| {
            let tx = conn.transaction().map_err(tx_error("delete_by_id"))?;
            let removed = tx
                .execute("DELETE FROM memos WHERE id = ?1;", [id])
                .map_err(tx_error("delete_by_id"))?;
            tx.commit().map_err(tx_error("delete_by_id"))?;

            // Deleting a missing id is a successful no-op.
            info!("event=memo_delete module=store status=ok id={id} removed={removed}");
            Ok(())
        })
    }
}

fn parse_memo_row(operation: &'static str, row: &Row<'_>) -> StoreResult<Memo> {
    let memo = Memo {
        id: Some(row.get::<_, MemoId>("id").map_err(tx_error(operation))?),
        title: row.get("title").map_err(tx_error(operation))?,
        content: row.get("content").map_err(tx_error(operation))?,
        url: row.get("url").map_err(tx_error(operation))?,
        created_at: row.get("created_at").map_err(tx_error(operation))?,
    };

    if let Err(err) = memo.validate() {
        let id = memo.id.unwrap_or_default();
        return Err(StoreError::InvalidData(format!(
            "stored memo {id} failed validation: {err}"
        )));
    }

    Ok(memo)
}
