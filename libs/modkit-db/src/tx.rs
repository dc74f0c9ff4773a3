//! Transaction finishing for SeaORM transactions.
//!
//! Repositories run a multi-statement body against a `DatabaseTransaction`
//! and hand the outcome to [`finish_tx`], which commits or rolls back.

use sea_orm::{DatabaseTransaction, DbErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    /// The body failed and the transaction was rolled back.
    #[error("transaction rolled back: {0}")]
    Aborted(#[source] DbErr),

    #[error("transaction commit failed: {0}")]
    Commit(#[source] DbErr),

    /// The body failed and the rollback failed too.
    #[error("rollback failed ({rollback}) after: {cause}")]
    RollbackFailed {
        #[source]
        cause: DbErr,
        rollback: DbErr,
    },
}

impl TxError {
    pub fn is_rollback_failure(&self) -> bool {
        matches!(self, TxError::RollbackFailed { .. })
    }
}

/// Commit `txn` when `result` is `Ok`, otherwise roll it back before surfacing the error.
pub async fn finish_tx<T>(
    txn: DatabaseTransaction,
    result: Result<T, DbErr>,
) -> Result<T, TxError> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(TxError::Commit)?;
            Ok(value)
        }
        Err(cause) => match txn.rollback().await {
            Ok(()) => Err(TxError::Aborted(cause)),
            Err(rollback) => {
                tracing::error!(error = %cause, rollback_error = %rollback, "transaction rollback failed");
                Err(TxError::RollbackFailed { cause, rollback })
            }
        },
    }
}
