//! Per-account authority index
//!
//! Authorities are keyed by `(owning account, authority id)` in a `BTreeMap`,
//! so one account's authorities occupy a contiguous key range and a range
//! scan answers the by-account query. Ids are assigned monotonically by the
//! ledger, which makes in-account iteration order equal insertion order - an
//! ordering callers and tests rely on.

use crate::authority::CustomAuthority;
use quill_core::{AccountId, CustomAuthorityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account-prefixed collection of custom authorities
///
/// Most accounts never install an authority; an empty by-account result is
/// the common state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityIndex {
    entries: BTreeMap<(AccountId, CustomAuthorityId), CustomAuthority>,
    owners: BTreeMap<CustomAuthorityId, AccountId>,
}

impl AuthorityIndex {
    /// An empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of authorities across every account
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any authority is installed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Install an authority under its owning account
    pub fn insert(&mut self, authority: CustomAuthority) {
        self.owners.insert(authority.id, authority.account);
        self.entries
            .insert((authority.account, authority.id), authority);
    }

    /// Look up one authority by id
    pub fn get(&self, id: CustomAuthorityId) -> Option<&CustomAuthority> {
        let account = self.owners.get(&id)?;
        self.entries.get(&(*account, id))
    }

    /// Apply a mutation to one authority in place
    ///
    /// The map keys are derived from `id` and `account`, so those two fields
    /// are pinned: whatever the closure writes to them is overwritten with
    /// the stored values before returning. Returns whether the authority
    /// existed.
    pub fn modify(
        &mut self,
        id: CustomAuthorityId,
        mutate: impl FnOnce(&mut CustomAuthority),
    ) -> bool {
        let Some(account) = self.owners.get(&id).copied() else {
            return false;
        };
        let Some(authority) = self.entries.get_mut(&(account, id)) else {
            return false;
        };
        mutate(authority);
        authority.id = id;
        authority.account = account;
        true
    }

    /// Remove one authority by id
    pub fn remove(&mut self, id: CustomAuthorityId) -> Option<CustomAuthority> {
        let account = self.owners.remove(&id)?;
        self.entries.remove(&(account, id))
    }

    /// All authorities owned by an account, in insertion order
    pub fn by_account(&self, account: AccountId) -> Vec<&CustomAuthority> {
        self.account_range(account).map(|(_, auth)| auth).collect()
    }

    /// Disable (never delete) every authority owned by an account
    ///
    /// Runs when the account's active authority changes: the delegation was
    /// granted relative to the owner's previous signing arrangement.
    /// Restriction content and ownership are left untouched. Returns how
    /// many authorities were flipped.
    pub fn disable_all_for(&mut self, account: AccountId) -> usize {
        let ids: Vec<CustomAuthorityId> =
            self.account_range(account).map(|(id, _)| id).collect();
        let mut disabled = 0;
        for id in &ids {
            if let Some(authority) = self.entries.get_mut(&(account, *id)) {
                if authority.enabled {
                    authority.enabled = false;
                    disabled += 1;
                }
            }
        }
        disabled
    }

    fn account_range(
        &self,
        account: AccountId,
    ) -> impl Iterator<Item = (CustomAuthorityId, &CustomAuthority)> + '_ {
        let start = (account, CustomAuthorityId::new(u64::MIN));
        let end = (account, CustomAuthorityId::new(u64::MAX));
        self.entries
            .range(start..=end)
            .map(|((_, id), authority)| (*id, authority))
    }
}
