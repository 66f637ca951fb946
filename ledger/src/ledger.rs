//! The token ledger: every externally callable operation.
//!
//! Each state-changing call runs through `run`: the call body
//! validates, mutates and queues events; the events are dispatched only if
//! the body returned `Ok`.

use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::genesis::{TokenGenesis, TokenMetadata};
use crate::info::TokenInfo;
use crate::throttle::MintThrottle;
use cinder_burn::BurnSplit;
use cinder_governance::{AdminCapability, BurnRateGovernor, GovernorParams, Ownership};
use cinder_store::TokenStore;
use cinder_types::{Address, Clock, LedgerParams, Timestamp};

pub struct Ledger<S, C> {
    pub(crate) metadata: TokenMetadata,
    pub(crate) ownership: Ownership,
    pub(crate) treasury: Address,
    pub(crate) governor: BurnRateGovernor,
    pub(crate) throttle: MintThrottle,
    pub(crate) paused: bool,
    pub(crate) params: LedgerParams,
    pub(crate) store: S,
    pub(crate) clock: C,
    pub(crate) events: EventBus,
}

impl<S: TokenStore, C: Clock> Ledger<S, C> {
    /// Create a ledger: burn policy at rate zero with the feature off, mint
    /// throttle started now, and the initial supply credited to the owner.
    pub fn new(
        genesis: TokenGenesis,
        params: LedgerParams,
        mut store: S,
        clock: C,
    ) -> Result<Self, LedgerError> {
        genesis.validate().map_err(LedgerError::Genesis)?;
        let now = clock.now();

        let supply = store.total_supply()?;
        let ceiling = params.max_supply();
        if supply
            .checked_add(genesis.initial_supply)
            .map_or(true, |total| total > ceiling)
        {
            return Err(LedgerError::SupplyCeilingExceeded {
                requested: genesis.initial_supply,
                total_supply: supply,
                ceiling,
            });
        }
        if genesis.initial_supply > 0 {
            store.raw_mint(&genesis.owner, genesis.initial_supply)?;
        }

        tracing::info!(
            name = %genesis.metadata.name,
            symbol = %genesis.metadata.symbol,
            owner = %genesis.owner,
            treasury = %genesis.treasury,
            initial_supply = %genesis.initial_supply,
            "ledger created"
        );

        Ok(Self {
            metadata: genesis.metadata,
            ownership: Ownership::new(genesis.owner),
            treasury: genesis.treasury,
            governor: BurnRateGovernor::new(GovernorParams::from(&params)),
            throttle: MintThrottle::new(now, params.mint_cooldown_secs),
            paused: false,
            params,
            store,
            clock,
            events: EventBus::new(),
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn owner(&self) -> Address {
        self.ownership.owner()
    }

    pub fn treasury(&self) -> Address {
        self.treasury
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn governor(&self) -> &BurnRateGovernor {
        &self.governor
    }

    pub fn throttle(&self) -> &MintThrottle {
        &self.throttle
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Register a listener for events of committed calls.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    // ── Read-only queries ────────────────────────────────────────────────

    pub fn balance_of(&self, account: &Address) -> Result<u128, LedgerError> {
        Ok(self.store.balance_of(account)?)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Result<u128, LedgerError> {
        Ok(self.store.allowance(owner, spender)?)
    }

    pub fn total_supply(&self) -> Result<u128, LedgerError> {
        Ok(self.store.total_supply()?)
    }

    /// Burned and delivered parts a transfer of `amount` would have right now.
    pub fn calculate_burn_for_amount(&self, amount: u128) -> Result<BurnSplit, LedgerError> {
        Ok(cinder_burn::split(
            amount,
            self.governor.feature_enabled(),
            self.governor.committed_rate(),
        )?)
    }

    /// Seconds until the pending burn rate can be executed (zero if none).
    pub fn get_time_until_burn_rate_update(&self) -> u64 {
        self.governor.time_until_executable(self.clock.now())
    }

    pub fn get_token_info(&self) -> Result<TokenInfo, LedgerError> {
        let now = self.clock.now();
        let pending = self.governor.pending();
        Ok(TokenInfo {
            name: self.metadata.name.clone(),
            symbol: self.metadata.symbol.clone(),
            decimals: self.metadata.decimals,
            owner: self.ownership.owner(),
            treasury: self.treasury,
            total_supply: self.store.total_supply()?,
            max_supply: self.params.max_supply(),
            treasury_balance: self.store.balance_of(&self.treasury)?,
            paused: self.paused,
            burn_rate: self.governor.committed_rate(),
            transfer_with_burn: self.governor.feature_enabled(),
            pending_burn_rate: pending.map(|p| p.proposed_rate),
            pending_effective_at: pending.map(|p| p.effective_at),
            time_until_burn_rate_update: self.governor.time_until_executable(now),
            last_mint_at: self.throttle.last_mint_at(),
            next_mint_at: self.throttle.next_mint_at(),
        })
    }

    // ── Burn-rate governance ─────────────────────────────────────────────

    pub fn propose_burn_rate(&mut self, caller: &Address, rate: u16) -> Result<(), LedgerError> {
        self.run("propose_burn_rate", |ledger, events| {
            let now = ledger.clock.now();
            let proposal = ledger
                .governor
                .propose(&ledger.ownership, caller, rate, now)?;
            events.push(LedgerEvent::BurnRateProposed {
                rate: proposal.proposed_rate,
                effective_at: proposal.effective_at,
            });
            Ok(())
        })
    }

    /// Commit the pending rate. Any caller may trigger it once the timelock
    /// has elapsed.
    pub fn execute_burn_rate_update(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.run("execute_burn_rate_update", |ledger, events| {
            let now = ledger.clock.now();
            let rate = ledger.governor.execute(now)?;
            tracing::debug!(%caller, "burn rate update executed");
            events.push(LedgerEvent::BurnRateUpdated { rate });
            Ok(())
        })
    }

    pub fn cancel_burn_rate_update(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.run("cancel_burn_rate_update", |ledger, events| {
            let discarded = ledger.governor.cancel(&ledger.ownership, caller)?;
            events.push(LedgerEvent::BurnRateProposalCancelled {
                proposed_rate: discarded.proposed_rate,
                committed_rate: ledger.governor.committed_rate(),
            });
            Ok(())
        })
    }

    pub fn set_transfer_with_burn(&mut self, caller: &Address, enabled: bool) -> Result<(), LedgerError> {
        self.run("set_transfer_with_burn", |ledger, events| {
            ledger
                .governor
                .set_feature_enabled(&ledger.ownership, caller, enabled)?;
            events.push(LedgerEvent::TransferWithBurnToggled { enabled });
            Ok(())
        })
    }

    // ── Transfers ────────────────────────────────────────────────────────

    /// Send `amount` from the caller to `to`, burning the committed share.
    pub fn transfer(&mut self, caller: &Address, to: &Address, amount: u128) -> Result<BurnSplit, LedgerError> {
        self.run("transfer", |ledger, events| {
            let split = ledger.move_with_burn(caller, to, amount, events)?;
            tracing::info!(
                from = %caller,
                %to,
                delivered = %split.deliver,
                burned = %split.burn,
                "transfer"
            );
            Ok(split)
        })
    }

    /// Spend `amount` of `from`'s balance on behalf of the caller.
    ///
    /// The full `amount` (burn included) is charged against the allowance.
    /// An allowance of `u128::MAX` is unlimited and never decremented.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<BurnSplit, LedgerError> {
        self.run("transfer_from", |ledger, events| {
            ledger.require_running()?;
            require_amount(amount)?;
            require_address(to, "recipient")?;

            let allowance = ledger.store.allowance(from, caller)?;
            if allowance < amount {
                return Err(LedgerError::InsufficientAllowance {
                    owner: *from,
                    spender: *caller,
                    needed: amount,
                    available: allowance,
                });
            }

            let unlimited = allowance == u128::MAX;
            if !unlimited {
                ledger.store.raw_approve(from, caller, allowance - amount)?;
            }
            let split = match ledger.move_with_burn(from, to, amount, events) {
                Ok(split) => split,
                Err(err) => {
                    if !unlimited {
                        ledger.store.raw_approve(from, caller, allowance)?;
                    }
                    return Err(err);
                }
            };

            tracing::info!(
                spender = %caller,
                %from,
                %to,
                delivered = %split.deliver,
                burned = %split.burn,
                "transfer_from"
            );
            Ok(split)
        })
    }

    pub fn approve(&mut self, caller: &Address, spender: &Address, amount: u128) -> Result<(), LedgerError> {
        self.run("approve", |ledger, events| {
            require_address(spender, "spender")?;
            ledger.store.raw_approve(caller, spender, amount)?;
            tracing::debug!(owner = %caller, %spender, amount = %amount, "approve");
            events.push(LedgerEvent::Approval {
                owner: *caller,
                spender: *spender,
                amount,
            });
            Ok(())
        })
    }

    // ── Treasury and supply ──────────────────────────────────────────────

    /// Mint `amount` into the treasury, subject to the cooldown and ceiling.
    pub fn mint(&mut self, caller: &Address, amount: u128) -> Result<(), LedgerError> {
        self.run("mint", |ledger, events| {
            ledger.require_owner(caller)?;
            ledger.require_running()?;
            require_amount(amount)?;

            let now = ledger.clock.now();
            ledger.throttle.check(now)?;

            let supply = ledger.store.total_supply()?;
            let ceiling = ledger.params.max_supply();
            if supply.checked_add(amount).map_or(true, |total| total > ceiling) {
                return Err(LedgerError::SupplyCeilingExceeded {
                    requested: amount,
                    total_supply: supply,
                    ceiling,
                });
            }

            ledger.store.raw_mint(&ledger.treasury, amount)?;
            ledger.throttle.record(now);
            tracing::info!(amount = %amount, treasury = %ledger.treasury, "mint");
            events.push(LedgerEvent::Mint {
                to: ledger.treasury,
                amount,
            });
            Ok(())
        })
    }

    /// Pay out of the treasury. Treasury payouts are not burn-taxed.
    pub fn send_from_treasury(&mut self, caller: &Address, to: &Address, amount: u128) -> Result<(), LedgerError> {
        self.run("send_from_treasury", |ledger, events| {
            ledger.require_owner(caller)?;
            ledger.require_running()?;
            require_amount(amount)?;
            require_address(to, "recipient")?;

            let treasury = ledger.treasury;
            let available = ledger.store.balance_of(&treasury)?;
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    account: treasury,
                    needed: amount,
                    available,
                });
            }
            ledger.store.raw_transfer(&treasury, to, amount)?;
            tracing::info!(%to, amount = %amount, "treasury payout");
            events.push(LedgerEvent::Transfer {
                from: treasury,
                to: *to,
                amount,
            });
            Ok(())
        })
    }

    // ── Administration ───────────────────────────────────────────────────

    pub fn pause(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.run("pause", |ledger, events| {
            ledger.require_owner(caller)?;
            if ledger.paused {
                return Err(LedgerError::AlreadyPaused);
            }
            ledger.paused = true;
            tracing::warn!(by = %caller, "ledger paused");
            events.push(LedgerEvent::Paused { by: *caller });
            Ok(())
        })
    }

    pub fn unpause(&mut self, caller: &Address) -> Result<(), LedgerError> {
        self.run("unpause", |ledger, events| {
            ledger.require_owner(caller)?;
            if !ledger.paused {
                return Err(LedgerError::NotPaused);
            }
            ledger.paused = false;
            tracing::info!(by = %caller, "ledger unpaused");
            events.push(LedgerEvent::Unpaused { by: *caller });
            Ok(())
        })
    }

    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: &Address) -> Result<(), LedgerError> {
        self.run("transfer_ownership", |ledger, events| {
            ledger.require_owner(caller)?;
            require_address(new_owner, "new owner")?;
            let previous = ledger.ownership.transfer(*new_owner);
            tracing::info!(%previous, new = %new_owner, "ownership transferred");
            events.push(LedgerEvent::OwnershipTransferred {
                previous,
                new: *new_owner,
            });
            Ok(())
        })
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn run<T>(
        &mut self,
        op: &'static str,
        body: impl FnOnce(&mut Self, &mut Vec<LedgerEvent>) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut queued = Vec::new();
        match body(self, &mut queued) {
            Ok(value) => {
                for event in &queued {
                    self.events.emit(event);
                }
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(op, error = %err, "call rejected");
                Err(err)
            }
        }
    }

    /// Validate and apply a taxed move. Leaves the store untouched on error.
    fn move_with_burn(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<BurnSplit, LedgerError> {
        self.require_running()?;
        require_amount(amount)?;
        require_address(to, "recipient")?;

        let available = self.store.balance_of(from)?;
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *from,
                needed: amount,
                available,
            });
        }

        let split = cinder_burn::split(
            amount,
            self.governor.feature_enabled(),
            self.governor.committed_rate(),
        )?;

        if split.is_taxed() {
            self.store.raw_burn(from, split.burn)?;
        }
        if let Err(err) = self.store.raw_transfer(from, to, split.deliver) {
            if split.is_taxed() {
                // put the burned units back so the failed call leaves no trace
                self.store.raw_mint(from, split.burn)?;
            }
            return Err(err.into());
        }

        if split.is_taxed() {
            events.push(LedgerEvent::Burn {
                from: *from,
                amount: split.burn,
            });
        }
        events.push(LedgerEvent::Transfer {
            from: *from,
            to: *to,
            amount: split.deliver,
        });
        Ok(split)
    }

    fn require_owner(&self, caller: &Address) -> Result<(), LedgerError> {
        if self.ownership.is_admin(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(*caller))
        }
    }

    fn require_running(&self) -> Result<(), LedgerError> {
        if self.paused {
            Err(LedgerError::SystemPaused)
        } else {
            Ok(())
        }
    }
}

fn require_amount(amount: u128) -> Result<(), LedgerError> {
    if amount == 0 {
        Err(LedgerError::ZeroAmount)
    } else {
        Ok(())
    }
}

fn require_address(address: &Address, role: &'static str) -> Result<(), LedgerError> {
    if address.is_zero() {
        Err(LedgerError::ZeroAddress(role))
    } else {
        Ok(())
    }
}
