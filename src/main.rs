use anyhow::{anyhow, bail, Context, Result};
use env_logger::Builder;
use log::{error, info, LevelFilter};
use mushi_stake_client::vault::{program_error, StakeTokenMetadata};
use mushi_stake_client::{connect, ClientError, Config, StakeVault};
use solana_pubkey::Pubkey;
use std::io::Write;
use std::str::FromStr;

fn print_usage(program: &str) {
    println!("Mushi Stake Client v{}", mushi_stake_client::VERSION);
    println!("\nUsage:");
    println!("  {} state", program);
    println!("  {} initialize --name NAME --symbol SYMBOL --uri URI", program);
    println!("  {} stake <AMOUNT>", program);
    println!(
        "  {} unstake <AMOUNT> --vault-owner <PUBKEY> [--eclipse-vault <PUBKEY>]",
        program
    );
    println!("  {} update-pool <MUSHI_PROGRAM>", program);
    println!("  {} --version", program);
    println!("\nEnvironment (also read from .env):");
    println!("  RPC_URL              JSON-RPC endpoint (default: http://localhost:8899)");
    println!("  KEYPAIR_PATH         Wallet keypair (default: ~/.config/solana/id.json)");
    println!("  PROGRAM_ID           Stake vault program");
    println!("  MUSHI_PROGRAM_ID     Mushi program allowed to call the vault");
    println!("  MUSHI_TOKEN_MINT     Mushi mint, required by initialize");
    println!("  ECLIPSE_TOKEN_MINT   Eclipse mint, required by initialize");
    println!("  POLL_INTERVAL_MS     Delay between confirmation polls");
    println!("  MAX_POLL_ATTEMPTS    Confirmation polls before giving up");
}

/// Value following `flag` in `args`
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|arg| arg == flag) {
        Some(i) => args
            .get(i + 1)
            .map(|value| Some(value.as_str()))
            .ok_or_else(|| anyhow!("Missing value for {}", flag)),
        None => Ok(None),
    }
}

fn parse_pubkey_flag(value: &str, flag: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("Invalid {}: {}", flag, value))
}

fn required_flag<'a>(args: &'a [String], flag: &str) -> Result<&'a str> {
    flag_value(args, flag)?.ok_or_else(|| anyhow!("Missing required option {}", flag))
}

fn amount_arg(value: Option<&String>) -> Result<&str> {
    value
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing <AMOUNT>"))
}

async fn print_state(vault: &StakeVault) -> Result<()> {
    let state = vault.get_main_state().await?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

async fn run(args: &[String], config: Config) -> Result<()> {
    let vault = connect(&config)?;
    info!("Using program {} as {}", vault.program_id(), vault.payer());

    match args[1].as_str() {
        "state" => print_state(&vault).await?,
        "initialize" => {
            let metadata = StakeTokenMetadata {
                name: required_flag(args, "--name")?.to_string(),
                symbol: required_flag(args, "--symbol")?.to_string(),
                uri: required_flag(args, "--uri")?.to_string(),
            };
            let mushi_mint = config
                .mushi_token_mint
                .context("MUSHI_TOKEN_MINT must be set to initialize")?;
            let eclipse_mint = config
                .eclipse_token_mint
                .context("ECLIPSE_TOKEN_MINT must be set to initialize")?;

            let outcome = vault
                .initialize(metadata, config.mushi_program_id, mushi_mint, eclipse_mint)
                .await?;
            println!("Initialized: {}", outcome.signature);
            println!("Stake token mint: {}", outcome.stake_token_mint);
            print_state(&vault).await?;
        }
        "stake" => {
            let amount = amount_arg(args.get(2))?;
            let signature = vault.stake(amount).await?;
            println!("Staked {}: {}", amount, signature);
        }
        "unstake" => {
            let amount = amount_arg(args.get(2))?;
            let owner = parse_pubkey_flag(required_flag(args, "--vault-owner")?, "--vault-owner")?;
            let eclipse_vault = flag_value(args, "--eclipse-vault")?
                .map(|vault| parse_pubkey_flag(vault, "--eclipse-vault"))
                .transpose()?;
            let signature = vault.unstake(amount, owner, eclipse_vault).await?;
            println!("Unstaked {}: {}", amount, signature);
        }
        "update-pool" => {
            let program = args.get(2).ok_or_else(|| anyhow!("Missing <MUSHI_PROGRAM>"))?;
            let program = Pubkey::from_str(program)
                .with_context(|| format!("Invalid mushi program: {}", program))?;
            let signature = vault.update_pool(program).await?;
            println!("Pool updated: {}", signature);
        }
        other => bail!("Unknown command: {}", other),
    }

    Ok(())
}

// Simple CLI without clap
#[tokio::main]
async fn main() -> Result<()> {
    Builder::new()
        .format(|buf, record| {
            let secs = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            writeln!(buf, "{} [{}] - {}", secs, record.level(), record.args())
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("Mushi Stake Client v{}", mushi_stake_client::VERSION);
        return Ok(());
    }

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(args.first().map(String::as_str).unwrap_or("mushi-stake"));
        return Ok(());
    }

    let config = Config::from_env()?;

    if let Err(err) = run(&args, config).await {
        if let Some(client_error) = err.downcast_ref::<ClientError>() {
            if let Some((name, message)) = program_error(client_error) {
                error!("Program error {}: {}", name, message);
            }
        }
        return Err(err);
    }

    Ok(())
}
