//! The verification orchestrator
//!
//! For each operation in a transaction, and for each account the ledger's
//! static rule says must authorize it: if the account has no enabled custom
//! authority, the engine has no opinion and the account falls through to the
//! normal signature path (this engine only adds capability, never removes the
//! default path). Otherwise at least one enabled authority must validate the
//! operation at head-block time. The first unverified account rejects the
//! whole transaction.

use crate::{Ledger, LedgerError};
use quill_protocol::Transaction;
use tracing::{debug, warn};

impl Ledger {
    /// Decide whether every required account of every operation is covered
    ///
    /// Read-only: consults only committed state, the candidate transaction,
    /// and the logical head-block time. Runs before signature checks in the
    /// surrounding validation pipeline.
    pub fn verify_custom_authorities(&self, tx: &Transaction) -> Result<(), LedgerError> {
        let now = self.head_block_time();

        for op in &tx.operations {
            for account in op.required_authorities() {
                let enabled: Vec<_> = self
                    .authorities()
                    .by_account(account)
                    .into_iter()
                    .filter(|authority| authority.enabled)
                    .collect();

                // No enabled authorities: the normal signature path decides.
                if enabled.is_empty() {
                    continue;
                }

                let verified = enabled.iter().any(|authority| authority.validate(op, now));
                if !verified {
                    warn!(
                        %account,
                        operation = %op.kind(),
                        candidates = enabled.len(),
                        "operation not verified by any custom authority"
                    );
                    return Err(LedgerError::NotVerified { account });
                }
                debug!(
                    %account,
                    operation = %op.kind(),
                    "operation verified by custom authority"
                );
            }
        }
        Ok(())
    }
}
