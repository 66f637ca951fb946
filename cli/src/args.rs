//! Command-line surface of `cinder`.

use std::path::PathBuf;

use cinder_types::{parse_amount, Address};
use cinder_utils::LogFormat;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cinder", version, about = "Cinder token ledger with a timelocked burn rate")]
pub struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// flags and env vars override them.
    #[arg(long, global = true, env = "CINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ledger state file (defaults to the config's `state_file`).
    #[arg(long, global = true, env = "CINDER_STATE")]
    pub state: Option<PathBuf>,

    /// Account issuing the call: a 0x-prefixed address or a label.
    #[arg(long, global = true, env = "CINDER_CALLER", value_parser = parse_address)]
    pub caller: Option<Address>,

    /// Evaluate the call at this unix time instead of the system clock.
    #[arg(long, global = true, env = "CINDER_AT")]
    pub at: Option<u64>,

    /// Log filter: "trace", "debug", "info", "warn", "error" or a directive.
    #[arg(long, global = true, env = "CINDER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output: "human" or "json".
    #[arg(long, global = true, env = "CINDER_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new ledger state file.
    Init(InitArgs),
    /// Show token metadata, supply, burn policy and mint schedule.
    Info,
    /// Show an account's balance.
    Balance {
        #[arg(value_parser = parse_address)]
        account: Address,
    },
    /// Show how much `spender` may move out of `owner`'s balance.
    Allowance {
        #[arg(value_parser = parse_address)]
        owner: Address,
        #[arg(value_parser = parse_address)]
        spender: Address,
    },
    /// Transfer tokens from the caller, burning the committed share.
    Transfer {
        #[arg(value_parser = parse_address)]
        to: Address,
        #[arg(value_parser = parse_token_amount)]
        amount: u128,
    },
    /// Transfer tokens out of `from` using the caller's allowance.
    TransferFrom {
        #[arg(value_parser = parse_address)]
        from: Address,
        #[arg(value_parser = parse_address)]
        to: Address,
        #[arg(value_parser = parse_token_amount)]
        amount: u128,
    },
    /// Set the caller's allowance for `spender` ("max" for unlimited).
    Approve {
        #[arg(value_parser = parse_address)]
        spender: Address,
        #[arg(value_parser = parse_allowance)]
        amount: u128,
    },
    /// Mint tokens into the treasury (owner only).
    Mint {
        #[arg(value_parser = parse_token_amount)]
        amount: u128,
    },
    /// Pay tokens out of the treasury, untaxed (owner only).
    SendFromTreasury {
        #[arg(value_parser = parse_address)]
        to: Address,
        #[arg(value_parser = parse_token_amount)]
        amount: u128,
    },
    /// Halt token movement (owner only).
    Pause,
    /// Resume token movement (owner only).
    Unpause,
    /// Hand administration to another account (owner only).
    TransferOwnership {
        #[arg(value_parser = parse_address)]
        new_owner: Address,
    },
    /// Propose a new burn rate in thousandths (owner only).
    ProposeBurnRate { rate: u16 },
    /// Commit the pending burn rate once its timelock has elapsed.
    ExecuteBurnRate,
    /// Discard the pending burn rate (owner only).
    CancelBurnRate,
    /// Switch burn-on-transfer on or off (owner only).
    SetTransferWithBurn {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Show the burn and delivered parts of a transfer of `amount`.
    QuoteBurn {
        #[arg(value_parser = parse_token_amount)]
        amount: u128,
    },
    /// Seconds until the pending burn rate can be executed.
    TimeUntilUpdate,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub symbol: Option<String>,
    /// Initial owner (defaults to the config, then `--caller`).
    #[arg(long, value_parser = parse_address)]
    pub owner: Option<Address>,
    #[arg(long, value_parser = parse_address)]
    pub treasury: Option<Address>,
    /// Whole-token amount credited to the owner.
    #[arg(long, value_parser = parse_token_amount)]
    pub initial_supply: Option<u128>,
    /// Use short timelock and cooldown for local experimentation.
    #[arg(long)]
    pub dev: bool,
    /// Overwrite an existing state file.
    #[arg(long)]
    pub force: bool,
}

impl Command {
    /// Whether the command changes ledger state and must be persisted.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::Info
                | Command::Balance { .. }
                | Command::Allowance { .. }
                | Command::QuoteBurn { .. }
                | Command::TimeUntilUpdate
        )
    }
}

/// Accept a hex address (`0x` optional) or derive one from a label.
pub fn parse_address(s: &str) -> Result<Address, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("address must not be empty".into());
    }
    match s.parse::<Address>() {
        Ok(address) => Ok(address),
        Err(e) if s.starts_with("0x") => Err(e.to_string()),
        Err(_) => Ok(Address::from_label(s)),
    }
}

pub fn parse_token_amount(s: &str) -> Result<u128, String> {
    parse_amount(s).ok_or_else(|| format!("invalid token amount '{s}'"))
}

fn parse_allowance(s: &str) -> Result<u128, String> {
    if s.eq_ignore_ascii_case("max") {
        Ok(u128::MAX)
    } else {
        parse_token_amount(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_types::TOKEN_UNIT;

    #[test]
    fn addresses_accept_hex_or_label() {
        let hex = "0x00000000000000000000000000000000000000ff";
        assert_eq!(parse_address(hex).unwrap().as_bytes()[19], 0xff);
        assert_eq!(parse_address("alice").unwrap(), Address::from_label("alice"));
        assert!(parse_address("0xzz").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn amounts_are_whole_tokens() {
        assert_eq!(parse_token_amount("2.5").unwrap(), 5 * TOKEN_UNIT / 2);
        assert!(parse_token_amount("abc").is_err());
        assert_eq!(parse_allowance("MAX").unwrap(), u128::MAX);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cinder", "transfer", "bob", "1.5", "--caller", "alice", "--at", "100",
        ])
        .unwrap();
        assert_eq!(cli.caller, Some(Address::from_label("alice")));
        assert_eq!(cli.at, Some(100));
        assert!(matches!(cli.command, Command::Transfer { amount, .. } if amount == 3 * TOKEN_UNIT / 2));
        assert!(cli.command.is_mutating());
    }

    #[test]
    fn boolish_toggle() {
        let cli = Cli::try_parse_from(["cinder", "set-transfer-with-burn", "on"]).unwrap();
        assert!(matches!(cli.command, Command::SetTransferWithBurn { enabled: true }));
    }
}
