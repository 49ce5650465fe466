//! Operation evaluators
//!
//! [`Ledger::push_transaction`] is the single mutation path: verify the whole
//! transaction against installed custom authorities first, then evaluate its
//! operations in order. Each evaluator validates against the state left by
//! the operations before it in the same transaction, so a create followed by
//! an update of the new authority works while an update of a just-deleted
//! one is rejected. Evaluation runs on a staged copy that is committed only
//! when every operation succeeds, so a rejected transaction leaves the
//! ledger untouched.

use crate::{Ledger, LedgerError};
use quill_authorization::{CustomAuthority, RestrictionError};
use quill_core::CustomAuthorityId;
use quill_protocol::{
    AccountUpdateOperation, CustomAuthorityCreateOperation, CustomAuthorityDeleteOperation,
    CustomAuthorityUpdateOperation, Operation, OperationKind, Transaction,
};
use tracing::debug;

impl Ledger {
    /// Verify and apply a transaction
    ///
    /// Verification runs against committed state before any operation is
    /// evaluated; a transaction whose verification or evaluation fails at
    /// any point leaves the ledger untouched.
    pub fn push_transaction(&mut self, tx: &Transaction) -> Result<(), LedgerError> {
        self.verify_custom_authorities(tx)?;

        let mut staged = self.clone();
        for op in &tx.operations {
            staged.apply_operation(op)?;
        }
        *self = staged;
        Ok(())
    }

    fn apply_operation(&mut self, op: &Operation) -> Result<(), LedgerError> {
        match op {
            Operation::CustomAuthorityCreate(create) => self.apply_create(create),
            Operation::CustomAuthorityUpdate(update) => self.apply_update(update),
            Operation::CustomAuthorityDelete(delete) => self.apply_delete(delete),
            Operation::AccountUpdate(update) => {
                self.apply_account_update(update);
                Ok(())
            }
            // Balance-moving operations are handled by the surrounding
            // ledger; they carry no custom-authority state change.
            _ => Ok(()),
        }
    }

    fn apply_create(&mut self, op: &CustomAuthorityCreateOperation) -> Result<(), LedgerError> {
        let id = CustomAuthorityId::new(self.next_authority_id());
        let authority = self.build_authority(op, id)?;
        self.allocate_authority_id();
        debug!(
            authority = %authority.id,
            account = %authority.account,
            operation_type = %authority.operation_type,
            "custom authority installed"
        );
        self.authorities_mut().insert(authority);
        Ok(())
    }

    fn apply_update(&mut self, op: &CustomAuthorityUpdateOperation) -> Result<(), LedgerError> {
        let mut updated = self
            .owned_authority(op.account, op.authority_to_update)?
            .clone();
        if let Some(enabled) = op.new_enabled {
            updated.enabled = enabled;
        }
        if let Some(valid_from) = op.new_valid_from {
            updated.valid_from = valid_from;
        }
        if let Some(valid_to) = op.new_valid_to {
            updated.valid_to = valid_to;
        }
        if let Some(restrictions) = &op.new_restrictions {
            updated.restrictions = restrictions.clone();
            updated.validate_restrictions()?;
        }
        self.authorities_mut()
            .modify(op.authority_to_update, |authority| *authority = updated);
        debug!(authority = %op.authority_to_update, "custom authority updated");
        Ok(())
    }

    fn apply_delete(&mut self, op: &CustomAuthorityDeleteOperation) -> Result<(), LedgerError> {
        self.owned_authority(op.account, op.authority_to_delete)?;
        self.authorities_mut().remove(op.authority_to_delete);
        debug!(authority = %op.authority_to_delete, "custom authority removed");
        Ok(())
    }

    /// Disable-on-account-change hook
    ///
    /// A custom authority's semantics are meaningful only relative to the
    /// owner's signing arrangement at the time it was installed, so replacing
    /// the active authority disables (never deletes) all of the account's
    /// custom authorities.
    fn apply_account_update(&mut self, op: &AccountUpdateOperation) {
        if op.new_active.is_some() {
            let disabled = self.authorities_mut().disable_all_for(op.account);
            if disabled > 0 {
                debug!(
                    account = %op.account,
                    disabled,
                    "active authority changed; custom authorities disabled"
                );
            }
        }
    }

    fn build_authority(
        &self,
        op: &CustomAuthorityCreateOperation,
        id: CustomAuthorityId,
    ) -> Result<CustomAuthority, LedgerError> {
        let operation_type =
            OperationKind::try_from(op.operation_type).map_err(RestrictionError::from)?;
        let authority = CustomAuthority {
            id,
            account: op.account,
            enabled: op.enabled,
            valid_from: op.valid_from,
            valid_to: op.valid_to,
            operation_type,
            restrictions: op.restrictions.clone(),
        };
        authority.validate_restrictions()?;
        Ok(authority)
    }

    fn owned_authority(
        &self,
        account: quill_core::AccountId,
        id: CustomAuthorityId,
    ) -> Result<&CustomAuthority, LedgerError> {
        let authority = self
            .authorities()
            .get(id)
            .ok_or(LedgerError::AuthorityNotFound { id })?;
        if authority.account != account {
            return Err(LedgerError::NotAuthorityOwner { account, id });
        }
        Ok(authority)
    }
}
