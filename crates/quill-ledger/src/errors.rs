//! Ledger-level errors
//!
//! [`LedgerError::NotVerified`] is the fatal verification failure: no enabled
//! custom authority of a required account validated the operation. The
//! structural variants reject the mutating operation itself - a transaction
//! carrying an invalid create/update is never applied.

use quill_authorization::RestrictionError;
use quill_core::{AccountId, CustomAuthorityId};

/// Why a transaction was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A restriction or authority failed creation-time structural validation
    #[error(transparent)]
    Restriction(#[from] RestrictionError),

    /// An update or delete named an authority that does not exist
    #[error("custom authority {id} not found")]
    AuthorityNotFound {
        /// The missing authority
        id: CustomAuthorityId,
    },

    /// An update or delete came from an account that does not own the
    /// authority
    #[error("{account} does not own custom authority {id}")]
    NotAuthorityOwner {
        /// The account that attempted the mutation
        account: AccountId,
        /// The authority it tried to mutate
        id: CustomAuthorityId,
    },

    /// No enabled custom authority of a required account validated the
    /// operation
    #[error("operation was not verified by any custom authority of {account}")]
    NotVerified {
        /// The unverified required account
        account: AccountId,
    },
}
