//! Token storage trait.

use crate::StoreError;
use cinder_types::Address;

/// Raw balance, allowance and supply primitives.
pub trait TokenStore {
    fn balance_of(&self, account: &Address) -> Result<u128, StoreError>;
    fn allowance(&self, owner: &Address, spender: &Address) -> Result<u128, StoreError>;
    fn total_supply(&self) -> Result<u128, StoreError>;

    /// Move `amount` from `from` to `to`; supply is unchanged.
    fn raw_transfer(&mut self, from: &Address, to: &Address, amount: u128) -> Result<(), StoreError>;

    /// Destroy `amount` from `from`, reducing total supply.
    fn raw_burn(&mut self, from: &Address, amount: u128) -> Result<(), StoreError>;

    /// Create `amount` in `to`, increasing total supply.
    fn raw_mint(&mut self, to: &Address, amount: u128) -> Result<(), StoreError>;

    /// Overwrite the allowance of `spender` over `owner`'s balance.
    fn raw_approve(&mut self, owner: &Address, spender: &Address, amount: u128) -> Result<(), StoreError>;
}
