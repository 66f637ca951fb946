//! Administrative access control.
//!
//! Administrative transitions take an [`AdminCapability`] rather than
//! assuming a fixed owner, so single-owner, multi-signature or role-based
//! schemes can be swapped in without touching the state machines.

use cinder_types::Address;
use serde::{Deserialize, Serialize};

/// Decides whether a caller may perform administrative actions.
pub trait AdminCapability {
    fn is_admin(&self, caller: &Address) -> bool;
}

/// Single-owner access control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owner: Address,
}

impl Ownership {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Hand administration to `new_owner`, returning the previous owner.
    pub fn transfer(&mut self, new_owner: Address) -> Address {
        std::mem::replace(&mut self.owner, new_owner)
    }
}

impl AdminCapability for Ownership {
    fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.owner
    }
}

impl<F> AdminCapability for F
where
    F: Fn(&Address) -> bool,
{
    fn is_admin(&self, caller: &Address) -> bool {
        self(caller)
    }
}
