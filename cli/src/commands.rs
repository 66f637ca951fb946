//! Command dispatch: load the ledger state, apply one call, persist.
//!
//! Every command prints a JSON document with the call's `result` and the
//! `events` it emitted. Queries never rewrite the state file.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Context as _};
use cinder_ledger::{Ledger, LedgerEvent, LedgerSnapshot, TokenGenesis};
use cinder_store::MemoryStore;
use cinder_types::{format_amount, parse_amount, Address, Clock, FixedClock, LedgerParams, SystemClock, Timestamp};
use cinder_utils::format_duration;
use serde_json::{json, Value};

use crate::args::{Command, InitArgs};
use crate::config::CliConfig;

/// System time unless the invocation pins it with `--at`.
#[derive(Clone, Copy, Debug)]
pub enum CommandClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl CommandClock {
    pub fn new(at: Option<u64>) -> Self {
        match at {
            Some(secs) => CommandClock::Fixed(FixedClock(Timestamp::new(secs))),
            None => CommandClock::System(SystemClock),
        }
    }
}

impl Clock for CommandClock {
    fn now(&self) -> Timestamp {
        match self {
            CommandClock::System(clock) => clock.now(),
            CommandClock::Fixed(clock) => clock.now(),
        }
    }
}

type CliLedger = Ledger<MemoryStore, CommandClock>;

/// Resolved settings for one invocation.
#[derive(Clone, Debug)]
pub struct Context {
    pub state_file: PathBuf,
    pub caller: Option<Address>,
    pub clock: CommandClock,
    pub config: CliConfig,
}

impl Context {
    fn caller(&self) -> anyhow::Result<Address> {
        self.caller
            .ok_or_else(|| anyhow!("this command needs --caller (or CINDER_CALLER)"))
    }
}

pub async fn execute(command: Command, ctx: &Context) -> anyhow::Result<Value> {
    let command = match command {
        Command::Init(args) => return init(args, ctx).await,
        other => other,
    };

    let mut ledger = load(&ctx.state_file, ctx.clock).await?;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ledger.subscribe(Box::new(move |event: &LedgerEvent| {
        if let Ok(mut events) = sink.lock() {
            events.push(event.clone());
        }
    }));

    let mutating = command.is_mutating();
    let result = apply(&mut ledger, command, ctx)?;
    if mutating {
        save(&ledger, &ctx.state_file).await?;
    }

    let events = seen.lock().map(|e| e.clone()).unwrap_or_default();
    Ok(json!({ "result": result, "events": events }))
}

async fn init(args: InitArgs, ctx: &Context) -> anyhow::Result<Value> {
    let path = &ctx.state_file;
    if !args.force && tokio::fs::try_exists(path).await.unwrap_or(false) {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let token = &ctx.config.token;
    let owner = match (args.owner, &token.owner) {
        (Some(owner), _) => owner,
        (None, Some(label)) => crate::args::parse_address(label).map_err(|e| anyhow!(e))?,
        (None, None) => ctx.caller().context("no owner given for the new ledger")?,
    };
    let initial_supply = match args.initial_supply {
        Some(raw) => raw,
        None => parse_amount(&token.initial_supply)
            .ok_or_else(|| anyhow!("invalid initial_supply '{}' in config", token.initial_supply))?,
    };

    let mut genesis = TokenGenesis::new(
        args.name.unwrap_or_else(|| token.name.clone()),
        args.symbol.unwrap_or_else(|| token.symbol.clone()),
        owner,
    )
    .with_initial_supply(initial_supply);
    if let Some(treasury) = args.treasury {
        genesis = genesis.with_treasury(treasury);
    } else if let Some(label) = &token.treasury {
        genesis = genesis.with_treasury(crate::args::parse_address(label).map_err(|e| anyhow!(e))?);
    }

    let params = if args.dev {
        LedgerParams::dev_defaults()
    } else {
        ctx.config.params.clone()
    };

    let ledger = Ledger::new(genesis, params, MemoryStore::new(), ctx.clock)?;
    save(&ledger, path).await?;
    tracing::info!(path = %path.display(), "ledger initialised");

    Ok(json!({ "result": ledger.get_token_info()?, "events": [] }))
}

fn apply(ledger: &mut CliLedger, command: Command, ctx: &Context) -> anyhow::Result<Value> {
    let value = match command {
        Command::Init(_) => bail!("init is handled before the state file is loaded"),
        Command::Info => serde_json::to_value(ledger.get_token_info()?)?,
        Command::Balance { account } => amount_json(ledger.balance_of(&account)?),
        Command::Allowance { owner, spender } => amount_json(ledger.allowance(&owner, &spender)?),
        Command::Transfer { to, amount } => {
            serde_json::to_value(ledger.transfer(&ctx.caller()?, &to, amount)?)?
        }
        Command::TransferFrom { from, to, amount } => {
            serde_json::to_value(ledger.transfer_from(&ctx.caller()?, &from, &to, amount)?)?
        }
        Command::Approve { spender, amount } => {
            ledger.approve(&ctx.caller()?, &spender, amount)?;
            Value::Null
        }
        Command::Mint { amount } => {
            ledger.mint(&ctx.caller()?, amount)?;
            amount_json(ledger.balance_of(&ledger.treasury())?)
        }
        Command::SendFromTreasury { to, amount } => {
            ledger.send_from_treasury(&ctx.caller()?, &to, amount)?;
            amount_json(ledger.balance_of(&ledger.treasury())?)
        }
        Command::Pause => {
            ledger.pause(&ctx.caller()?)?;
            Value::Null
        }
        Command::Unpause => {
            ledger.unpause(&ctx.caller()?)?;
            Value::Null
        }
        Command::TransferOwnership { new_owner } => {
            ledger.transfer_ownership(&ctx.caller()?, &new_owner)?;
            Value::Null
        }
        Command::ProposeBurnRate { rate } => {
            ledger.propose_burn_rate(&ctx.caller()?, rate)?;
            countdown_json(ledger.get_time_until_burn_rate_update())
        }
        Command::ExecuteBurnRate => {
            ledger.execute_burn_rate_update(&ctx.caller()?)?;
            json!({ "burn_rate": ledger.governor().committed_rate() })
        }
        Command::CancelBurnRate => {
            ledger.cancel_burn_rate_update(&ctx.caller()?)?;
            Value::Null
        }
        Command::SetTransferWithBurn { enabled } => {
            ledger.set_transfer_with_burn(&ctx.caller()?, enabled)?;
            json!({ "transfer_with_burn": enabled })
        }
        Command::QuoteBurn { amount } => {
            let split = ledger.calculate_burn_for_amount(amount)?;
            json!({
                "burn": split.burn,
                "deliver": split.deliver,
                "burn_tokens": format_amount(split.burn),
                "deliver_tokens": format_amount(split.deliver),
            })
        }
        Command::TimeUntilUpdate => countdown_json(ledger.get_time_until_burn_rate_update()),
    };
    Ok(value)
}

fn amount_json(raw: u128) -> Value {
    json!({ "raw": raw, "tokens": format_amount(raw) })
}

fn countdown_json(secs: u64) -> Value {
    json!({ "seconds": secs, "human": format_duration(secs) })
}

async fn load(path: &Path, clock: CommandClock) -> anyhow::Result<CliLedger> {
    let bytes = tokio::fs::read(path).await.with_context(|| {
        format!("cannot read ledger state {} (run `cinder init` first)", path.display())
    })?;
    let snapshot = LedgerSnapshot::from_bytes(&bytes)
        .with_context(|| format!("corrupt ledger state {}", path.display()))?;
    tracing::debug!(path = %path.display(), hash = %snapshot.hash_hex(), "loaded ledger state");
    Ok(Ledger::restore(snapshot, clock)?)
}

/// Write via a sibling temp file and rename so a crash never leaves a torn
/// state file.
async fn save(ledger: &CliLedger, path: &Path) -> anyhow::Result<()> {
    let snapshot = ledger.snapshot()?;
    let bytes = snapshot.to_bytes()?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &bytes)
        .await
        .with_context(|| format!("cannot write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("cannot replace {}", path.display()))?;
    tracing::debug!(path = %path.display(), hash = %snapshot.hash_hex(), bytes = bytes.len(), "saved ledger state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_types::TOKEN_UNIT;

    const T0: u64 = 1_000_000;

    fn ctx(dir: &tempfile::TempDir, caller: &str, at: u64) -> Context {
        Context {
            state_file: dir.path().join("state.bin"),
            caller: Some(Address::from_label(caller)),
            clock: CommandClock::new(Some(at)),
            config: CliConfig::default(),
        }
    }

    fn init_args(supply: u128) -> InitArgs {
        InitArgs {
            name: None,
            symbol: None,
            owner: None,
            treasury: None,
            initial_supply: Some(supply),
            dev: false,
            force: false,
        }
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let owner = ctx(&dir, "owner", T0);
        execute(Command::Init(init_args(0)), &owner).await.unwrap();
        let again = execute(Command::Init(init_args(0)), &owner).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn state_persists_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let owner = ctx(&dir, "owner", T0);
        execute(Command::Init(init_args(100 * TOKEN_UNIT)), &owner).await.unwrap();

        execute(Command::ProposeBurnRate { rate: 50 }, &owner).await.unwrap();
        let later = ctx(&dir, "anyone", T0 + 172_800);
        execute(Command::ExecuteBurnRate, &later).await.unwrap();
        let owner_later = ctx(&dir, "owner", T0 + 172_800);
        execute(Command::SetTransferWithBurn { enabled: true }, &owner_later)
            .await
            .unwrap();

        let out = execute(
            Command::Transfer {
                to: Address::from_label("bob"),
                amount: 50 * TOKEN_UNIT,
            },
            &owner_later,
        )
        .await
        .unwrap();
        assert_eq!(out["events"][0]["event"], "burn");
        assert_eq!(out["events"][1]["event"], "transfer");

        let balance = execute(
            Command::Balance {
                account: Address::from_label("bob"),
            },
            &owner_later,
        )
        .await
        .unwrap();
        assert_eq!(balance["result"]["tokens"], "47.5");
    }

    #[tokio::test]
    async fn rejected_call_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let owner = ctx(&dir, "owner", T0);
        execute(Command::Init(init_args(TOKEN_UNIT)), &owner).await.unwrap();
        let before = std::fs::read(&owner.state_file).unwrap();

        let stranger = ctx(&dir, "mallory", T0);
        assert!(execute(Command::Pause, &stranger).await.is_err());
        assert_eq!(std::fs::read(&owner.state_file).unwrap(), before);
    }

    #[tokio::test]
    async fn missing_state_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = execute(Command::Info, &ctx(&dir, "owner", T0)).await.unwrap_err();
        assert!(err.to_string().contains("cinder init"));
    }

    #[tokio::test]
    async fn mutating_command_requires_caller() {
        let dir = tempfile::tempdir().unwrap();
        let owner = ctx(&dir, "owner", T0);
        execute(Command::Init(init_args(0)), &owner).await.unwrap();
        let anonymous = Context {
            caller: None,
            ..owner
        };
        assert!(execute(Command::Pause, &anonymous).await.is_err());
    }
}
