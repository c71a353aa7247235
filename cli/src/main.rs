//! Referral Hub CLI
//!
//! User-facing actions as subcommands: select a role, activate with a
//! password and verify it on login, manage agents, view the dashboard,
//! withdraw, log out.
//! Each command prints a success or failure line; failures exit
//! non-zero and never mutate stored state.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hub_backend::{MockStatsApi, StatsApi};
use hub_core::{build_referral_link, HubConfig, HubError, ReferralLink, Role};
use hub_store::{AccountStore, StoreError, StoredAccount};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod render;

use render::DashboardView;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn cli() -> Command {
    Command::new("hub")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Referral Hub - referral links and commission tracking")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .help("Path to the session file (default: ~/.referral-hub/session.json)"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .global(true)
                .help("Base URL referral links are composed against"),
        )
        .subcommand(
            Command::new("setup")
                .about("Select a role and generate your referral link")
                .arg(
                    Arg::new("role")
                        .long("role")
                        .required(true)
                        .help("Account role: agent or ambassador"),
                ),
        )
        .subcommand(
            Command::new("activate")
                .about("Set a password to activate the account")
                .arg(
                    Arg::new("password")
                        .long("password")
                        .required(true)
                        .help("Password (8+ chars, a digit, an uppercase letter)"),
                )
                .arg(
                    Arg::new("backup-email")
                        .long("backup-email")
                        .help("Optional recovery email"),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Verify your password against the saved session")
                .arg(
                    Arg::new("password")
                        .long("password")
                        .required(true)
                        .help("Password set during activation"),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show referral and commission statistics")
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .action(ArgAction::SetTrue)
                        .help("Keep refreshing the display stats"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                )
                .arg(
                    Arg::new("refresh-secs")
                        .long("refresh-secs")
                        .value_parser(value_parser!(u64).range(1..))
                        .help("Refresh interval for --watch (default 60)"),
                ),
        )
        .subcommand(
            Command::new("add-agent")
                .about("Register a new agent and generate their link")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Agent display name"),
                ),
        )
        .subcommand(
            Command::new("link")
                .about("Print a referral link for copying or sharing")
                .arg(
                    Arg::new("agent")
                        .long("agent")
                        .help("Sub-id of an agent (default: your personal link)"),
                )
                .arg(
                    Arg::new("share")
                        .long("share")
                        .action(ArgAction::SetTrue)
                        .help("Hand the link to the configured share integration"),
                ),
        )
        .subcommand(Command::new("withdraw").about("Withdraw everything outstanding"))
        .subcommand(Command::new("logout").about("End the session and clear stored data"))
}

async fn run() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let Some((name, args)) = matches.subcommand() else {
        unreachable!("subcommand required");
    };

    // Global args propagate into the subcommand's matches.
    let mut config = HubConfig::new();
    if let Some(base) = args.get_one::<String>("base-url") {
        config = config.with_base_url(base);
    }
    if name == "dashboard" {
        if let Some(secs) = args.get_one::<u64>("refresh-secs") {
            config = config.with_refresh_secs(*secs);
        }
    }

    let store = AccountStore::open(resolve_store_path(args.get_one::<String>("store"))?)?;

    match name {
        "setup" => setup(&store, &config, args).await,
        "activate" => activate(&store, args),
        "login" => login(&store, args),
        "dashboard" => dashboard(&store, &config, args).await,
        "add-agent" => add_agent(&store, &config, args),
        "link" => link(&store, &config, args),
        "withdraw" => withdraw(&store, &config),
        "logout" => logout(&store),
        other => unreachable!("unhandled subcommand {other}"),
    }
}

fn resolve_store_path(arg: Option<&String>) -> anyhow::Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = std::env::var_os("HUB_STORE") {
        return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("cannot locate home directory; pass --store"))?;
    Ok(PathBuf::from(home).join(".referral-hub").join("session.json"))
}

async fn setup(store: &AccountStore, config: &HubConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let role: Role = args
        .get_one::<String>("role")
        .map(|s| s.parse())
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("role is required"))?;

    let account = store.begin_session(role)?;

    // Seed the fresh session with the backend's display figures so the
    // dashboard has data on first view.
    let api = MockStatsApi::new(role);
    let stats = api.fetch_account_stats(&account.user_id).await?;
    let agents = api.fetch_agents(&account.user_id).await?;
    store.seed_stats(&stats, agents)?;

    let referral_link = build_referral_link(&config.base_url, role, &account.user_id, None);
    println!("Welcome to the Referral Hub!");
    println!("Your {} link: {referral_link}", role.title());
    println!("Set a password with `hub activate` to save your account.");
    Ok(())
}

fn activate(store: &AccountStore, args: &ArgMatches) -> anyhow::Result<()> {
    let password = args
        .get_one::<String>("password")
        .ok_or_else(|| anyhow::anyhow!("password is required"))?;
    let backup_email = args.get_one::<String>("backup-email").cloned();

    match store.activate(password, backup_email) {
        Ok(()) => {
            println!("Account activated successfully!");
            Ok(())
        }
        Err(StoreError::Domain(HubError::WeakPassword { report })) => {
            println!("Password does not meet all requirements:");
            println!(
                "  [{}] at least {} characters",
                tick(report.min_length),
                hub_core::MIN_PASSWORD_LENGTH
            );
            println!("  [{}] contains a number", tick(report.has_digit));
            println!("  [{}] contains a capital letter", tick(report.has_uppercase));
            anyhow::bail!("weak password")
        }
        Err(e) => Err(e.into()),
    }
}

fn login(store: &AccountStore, args: &ArgMatches) -> anyhow::Result<()> {
    let password = args
        .get_one::<String>("password")
        .ok_or_else(|| anyhow::anyhow!("password is required"))?;

    if store.verify_password(password)? {
        let account = store.snapshot()?.account;
        tracing::info!(user_id = %account.user_id, "password verified");
        println!("Welcome back, {}!", account.role.title());
        Ok(())
    } else {
        println!("Incorrect password.");
        anyhow::bail!("incorrect password")
    }
}

fn tick(passed: bool) -> char {
    if passed {
        'x'
    } else {
        ' '
    }
}

async fn dashboard(
    store: &AccountStore,
    config: &HubConfig,
    args: &ArgMatches,
) -> anyhow::Result<()> {
    let json = args.get_flag("json");
    let view = DashboardView::from_record(&store.snapshot()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!(
        "{}",
        render::render(&view, &config.base_url, &config.currency_symbol)
    );

    if !args.get_flag("watch") {
        return Ok(());
    }

    // Refresh loop: display stats only; agent records and balances are
    // never overwritten by a tick.
    let role = view.account.role;
    let user_id = view.account.user_id.clone();
    let api = MockStatsApi::new(role);
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(config.refresh_secs));
    interval.tick().await; // immediate first tick, already rendered
    loop {
        interval.tick().await;
        let stats = api.fetch_account_stats(&user_id).await?;
        store.refresh_display_stats(&stats)?;
        let view = DashboardView::from_record(&store.snapshot()?)?;
        println!("---");
        print!(
            "{}",
            render::render(&view, &config.base_url, &config.currency_symbol)
        );
    }
}

fn add_agent(store: &AccountStore, config: &HubConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let name = args
        .get_one::<String>("name")
        .ok_or_else(|| anyhow::anyhow!("name is required"))?;

    let record = store.snapshot()?;
    let agent = store.add_agent(name)?;
    let agent_link = build_referral_link(
        &config.base_url,
        Role::Ambassador,
        &record.account.user_id,
        Some(&agent.sub_id),
    );
    println!("Agent added successfully!");
    println!("Link for {}: {agent_link}", agent.name);
    Ok(())
}

fn link(store: &AccountStore, config: &HubConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let record = store.snapshot()?;
    let url = referral_url(
        &record,
        &config.base_url,
        args.get_one::<String>("agent").map(String::as_str),
    )?;

    if args.get_flag("share") {
        match share_link(&url) {
            Ok(()) => println!("Link shared successfully!"),
            Err(HubError::ShareUnsupported) => {
                println!("Sharing is not supported in this environment; copy the link instead:");
                println!("{url}");
            }
            Err(e) => return Err(e.into()),
        }
    } else {
        println!("{url}");
    }
    Ok(())
}

/// Resolve the link to print: an agent's sub-link or the personal one
fn referral_url(
    record: &StoredAccount,
    base_url: &str,
    agent_sub: Option<&str>,
) -> anyhow::Result<String> {
    let account = &record.account;
    let link = match agent_sub {
        Some(sub_id) => {
            let agent = record
                .agents
                .iter()
                .find(|a| a.sub_id == sub_id)
                .ok_or_else(|| anyhow::anyhow!("no agent with sub-id '{sub_id}'"))?;
            ReferralLink {
                role: Role::Ambassador,
                user_id: account.user_id.clone(),
                sub_id: Some(agent.sub_id.clone()),
            }
        }
        None => ReferralLink {
            role: account.role,
            user_id: account.user_id.clone(),
            sub_id: None,
        },
    };
    Ok(link.compose(base_url))
}

/// Hand the link to a share integration, if one is configured
///
/// The terminal has no native share sheet; `HUB_SHARE_CMD` names an
/// external command that receives the URL as its argument.
fn share_link(url: &str) -> Result<(), HubError> {
    let cmd = std::env::var("HUB_SHARE_CMD").map_err(|_| HubError::ShareUnsupported)?;
    let status = std::process::Command::new(&cmd)
        .arg(url)
        .status()
        .map_err(|_| HubError::ShareUnsupported)?;
    if status.success() {
        Ok(())
    } else {
        Err(HubError::ShareUnsupported)
    }
}

fn withdraw(store: &AccountStore, config: &HubConfig) -> anyhow::Result<()> {
    match store.withdraw() {
        Ok(receipt) => {
            let symbol = &config.currency_symbol;
            println!(
                "Congratulations! {symbol}{} has been sent to your wallet.",
                receipt.amount
            );
            println!(
                "  Personal earnings: {symbol}{}  From {} agents: {symbol}{}",
                receipt.personal, receipt.agents_settled, receipt.from_agents
            );
            Ok(())
        }
        Err(StoreError::Domain(HubError::NoFundsAvailable)) => {
            println!("Nothing to withdraw right now.");
            anyhow::bail!("no funds available")
        }
        Err(e) => Err(e.into()),
    }
}

fn logout(store: &AccountStore) -> anyhow::Result<()> {
    store.clear()?;
    tracing::info!("session cleared");
    println!("Logged out. Session data cleared.");
    Ok(())
}
