//! In-memory token store.
//!
//! Ordered maps keep iteration (and therefore serialization) deterministic,
//! which snapshot hashing relies on.

use crate::{StoreError, TokenStore};
use cinder_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<Address, BTreeMap<Address, u128>>,
    total_supply: u128,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Accounts with a non-zero balance, in address order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &u128)> {
        self.balances.iter()
    }

    fn balance(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn set_balance(&mut self, account: &Address, value: u128) {
        if value == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, value);
        }
    }

    fn debit(&mut self, account: &Address, amount: u128) -> Result<(), StoreError> {
        let available = self.balance(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(StoreError::InsufficientFunds {
                account: *account,
                needed: amount,
                available,
            })?;
        self.set_balance(account, remaining);
        Ok(())
    }

    fn credit(&mut self, account: &Address, amount: u128) -> Result<(), StoreError> {
        let updated = self
            .balance(account)
            .checked_add(amount)
            .ok_or(StoreError::Overflow("balance"))?;
        self.set_balance(account, updated);
        Ok(())
    }
}

impl TokenStore for MemoryStore {
    fn balance_of(&self, account: &Address) -> Result<u128, StoreError> {
        Ok(self.balance(account))
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Result<u128, StoreError> {
        Ok(self
            .allowances
            .get(owner)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(0))
    }

    fn total_supply(&self) -> Result<u128, StoreError> {
        Ok(self.total_supply)
    }

    fn raw_transfer(&mut self, from: &Address, to: &Address, amount: u128) -> Result<(), StoreError> {
        if from == to {
            // still refuse to move more than the account holds
            let available = self.balance(from);
            if available < amount {
                return Err(StoreError::InsufficientFunds {
                    account: *from,
                    needed: amount,
                    available,
                });
            }
            return Ok(());
        }
        // Check the credit side first so a failure leaves both balances intact.
        self.balance(to)
            .checked_add(amount)
            .ok_or(StoreError::Overflow("balance"))?;
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn raw_burn(&mut self, from: &Address, amount: u128) -> Result<(), StoreError> {
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(StoreError::Overflow("total supply"))?;
        self.debit(from, amount)?;
        self.total_supply = supply;
        Ok(())
    }

    fn raw_mint(&mut self, to: &Address, amount: u128) -> Result<(), StoreError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(StoreError::Overflow("total supply"))?;
        self.credit(to, amount)?;
        self.total_supply = supply;
        Ok(())
    }

    fn raw_approve(&mut self, owner: &Address, spender: &Address, amount: u128) -> Result<(), StoreError> {
        if amount == 0 {
            if let Some(m) = self.allowances.get_mut(owner) {
                m.remove(spender);
                if m.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances.entry(*owner).or_default().insert(*spender, amount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::from_label(label)
    }

    #[test]
    fn mint_transfer_burn_track_supply() {
        let mut store = MemoryStore::new();
        store.raw_mint(&addr("a"), 100).unwrap();
        store.raw_transfer(&addr("a"), &addr("b"), 40).unwrap();
        store.raw_burn(&addr("b"), 10).unwrap();

        assert_eq!(store.balance_of(&addr("a")).unwrap(), 60);
        assert_eq!(store.balance_of(&addr("b")).unwrap(), 30);
        assert_eq!(store.total_supply().unwrap(), 90);
    }

    #[test]
    fn overdraft_leaves_state_untouched() {
        let mut store = MemoryStore::new();
        store.raw_mint(&addr("a"), 5).unwrap();
        let before = store.clone();
        let err = store.raw_transfer(&addr("a"), &addr("b"), 6).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientFunds {
                account: addr("a"),
                needed: 6,
                available: 5,
            }
        );
        assert_eq!(store, before);
        assert!(store.raw_burn(&addr("a"), 6).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn self_transfer_is_a_checked_noop() {
        let mut store = MemoryStore::new();
        store.raw_mint(&addr("a"), 5).unwrap();
        store.raw_transfer(&addr("a"), &addr("a"), 5).unwrap();
        assert_eq!(store.balance_of(&addr("a")).unwrap(), 5);
        assert!(store.raw_transfer(&addr("a"), &addr("a"), 6).is_err());
    }

    #[test]
    fn emptied_accounts_are_dropped() {
        let mut store = MemoryStore::new();
        store.raw_mint(&addr("a"), 5).unwrap();
        store.raw_transfer(&addr("a"), &addr("b"), 5).unwrap();
        assert_eq!(store.holder_count(), 1);
        assert_eq!(store.holders().next(), Some((&addr("b"), &5)));
    }

    #[test]
    fn approvals_overwrite_and_clear() {
        let mut store = MemoryStore::new();
        store.raw_approve(&addr("a"), &addr("s"), 10).unwrap();
        store.raw_approve(&addr("a"), &addr("s"), 3).unwrap();
        assert_eq!(store.allowance(&addr("a"), &addr("s")).unwrap(), 3);
        store.raw_approve(&addr("a"), &addr("s"), 0).unwrap();
        assert_eq!(store.allowance(&addr("a"), &addr("s")).unwrap(), 0);
        assert_eq!(store, MemoryStore::new());
    }

    #[test]
    fn mint_overflow_rejected() {
        let mut store = MemoryStore::new();
        store.raw_mint(&addr("a"), u128::MAX).unwrap();
        assert_eq!(
            store.raw_mint(&addr("b"), 1),
            Err(StoreError::Overflow("total supply"))
        );
    }

    #[test]
    fn serializes_deterministically() {
        let mut a = MemoryStore::new();
        a.raw_mint(&addr("x"), 1).unwrap();
        a.raw_mint(&addr("y"), 2).unwrap();
        let mut b = MemoryStore::new();
        b.raw_mint(&addr("y"), 2).unwrap();
        b.raw_mint(&addr("x"), 1).unwrap();
        assert_eq!(bincode::serialize(&a).unwrap(), bincode::serialize(&b).unwrap());
    }
}
