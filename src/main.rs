use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use update_gate::config::Config;
use update_gate::model::{Availability, RawStatus, UpdateInfo};
use update_gate::session::record_decline;
use update_gate::state::{project, UpdateState};
use update_gate::store::{DeclineStore, FileDeclineStore};

#[derive(Parser, Debug)]
#[command(name = "update-gate", version, about = "Evaluate in-app update prompts")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Decline record file (overrides the config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the update state for an available build
    Evaluate {
        #[command(flatten)]
        update: UpdateArgs,
        /// Days since the update became available
        #[arg(long)]
        staleness_days: Option<i32>,
        #[arg(long, value_enum, default_value_t = AvailabilityArg::Available)]
        availability: AvailabilityArg,
        /// The platform does not allow an immediate flow
        #[arg(long)]
        no_immediate: bool,
        /// The platform does not allow a flexible flow
        #[arg(long)]
        no_flexible: bool,
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record that the user declined a build
    Decline {
        #[command(flatten)]
        update: UpdateArgs,
    },
    /// Print the stored decline record
    Show,
    /// Forget the stored decline record
    Reset,
}

#[derive(clap::Args, Debug)]
struct UpdateArgs {
    /// Version code of the available build
    #[arg(long)]
    version_code: i64,
    /// Update priority (0-5)
    #[arg(long, default_value_t = 0)]
    priority: i32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AvailabilityArg {
    Available,
    DeveloperTriggered,
}

impl From<AvailabilityArg> for Availability {
    fn from(arg: AvailabilityArg) -> Self {
        match arg {
            AvailabilityArg::Available => Availability::Available,
            AvailabilityArg::DeveloperTriggered => Availability::DeveloperTriggeredInProgress,
        }
    }
}

fn main() {
    update_gate::logging::init_tracing();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)?;
    let store_path = cli.store.unwrap_or_else(|| config.store.resolved_path());
    let store = FileDeclineStore::open(&store_path)
        .with_context(|| format!("opening decline store {}", store_path.display()))?;

    match cli.command {
        Command::Evaluate {
            update,
            staleness_days,
            availability,
            no_immediate,
            no_flexible,
            json,
        } => {
            let info = UpdateInfo {
                version_code: update.version_code,
                priority: update.priority,
                staleness_days,
                availability: availability.into(),
                immediate_allowed: !no_immediate,
                flexible_allowed: !no_flexible,
            };
            let state = project(
                &RawStatus::Available(info),
                &store.current(),
                &config.policy,
                Utc::now(),
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                println!("{}", describe(&state));
            }
        }
        Command::Decline { update } => {
            let info = UpdateInfo {
                version_code: update.version_code,
                priority: update.priority,
                staleness_days: None,
                availability: Availability::Available,
                immediate_allowed: true,
                flexible_allowed: true,
            };
            if record_decline(&store, &info, &config.policy, Utc::now())? {
                println!("Declined version {}", info.version_code);
            } else {
                println!(
                    "Version {} has priority {} and cannot be declined",
                    info.version_code, info.priority
                );
            }
        }
        Command::Show => {
            let record = store.current();
            if record.is_empty() {
                println!("No update declined");
            } else {
                println!(
                    "Declined version {} at {}",
                    record.version,
                    record.timestamp.to_rfc3339()
                );
            }
        }
        Command::Reset => {
            store.reset()?;
            println!("Decline record cleared ({})", store.path().display());
        }
    }

    Ok(())
}

fn describe(state: &UpdateState) -> String {
    match state {
        UpdateState::Loading => "Loading".to_string(),
        UpdateState::NotAvailable => "No update available".to_string(),
        UpdateState::RequiredUpdate { .. } => "Required update: start immediate flow".to_string(),
        UpdateState::OptionalUpdate { should_prompt, .. } => {
            if *should_prompt {
                "Optional update: prompt the user".to_string()
            } else {
                "Optional update: do not prompt yet".to_string()
            }
        }
        UpdateState::InProgressUpdate {
            bytes_downloaded,
            total_bytes,
        } => format!("Downloading: {} of {} bytes", bytes_downloaded, total_bytes),
        UpdateState::DownloadedUpdate { .. } => "Downloaded: ready to install".to_string(),
    }
}
