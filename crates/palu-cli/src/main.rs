use std::io::Read;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use palu_cli::config::{self, ConfigInfo, CredentialSource, PaluConfig};
use palu_cli::interview;
use palu_core::models::rdt::RdtResult;
use palu_storage::store::S3Store;
use palu_triage::memory::MemoryStore;
use palu_triage::service::{BlockTriageRequest, TriageService};
use palu_triage::session::StartParams;
use palu_triage::store::{DiagnosticStore, SessionStore};

#[derive(Debug, Parser)]
#[command(name = "palu", version, about = "Malaria triage for community health workers")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a full symptom payload in one go.
    Score {
        /// Symptom object as JSON, or `-` to read it from stdin.
        #[arg(long)]
        symptoms: String,
        #[arg(long)]
        weight: Option<f64>,
        /// POS, NEG or IND.
        #[arg(long)]
        rdt: Option<RdtResult>,
        #[arg(long)]
        patient: Option<Uuid>,
        #[arg(long)]
        relais: Option<Uuid>,
        /// Store the payload and result as a session.
        #[arg(long)]
        save: bool,
    },
    /// Ask the questions one at a time on the terminal.
    Interview {
        #[arg(long)]
        patient: Option<Uuid>,
        #[arg(long)]
        relais: Option<Uuid>,
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        rdt: Option<RdtResult>,
    },
    /// Print a stored session.
    Session { id: Uuid },
    /// Print the most recent diagnostic recorded for a patient.
    LatestDiagnostic { patient: Uuid },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration, credentials redacted.
    Show,
    /// Write a new config file.
    Init {
        #[arg(long, default_value = config::DEFAULT_REGION)]
        region: String,
        #[arg(long)]
        bucket: Option<String>,
        /// Named AWS profile; the default credential chain is used otherwise.
        #[arg(long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let command = match cli.command {
        Command::Config(cmd) => return run_config(cmd),
        other => other,
    };

    let cfg = PaluConfig::load_effective()?;
    match cfg.bucket.clone() {
        Some(bucket) => {
            let sdk = palu_cli::aws::sdk_config(&cfg).await;
            let store = S3Store::new(palu_storage::client::from_sdk_config(&sdk), bucket);
            tracing::debug!(bucket = store.bucket(), region = %cfg.region, "using S3 backend");
            run_command(TriageService::new(store.clone(), store), command, true).await
        }
        None => {
            tracing::debug!("no bucket configured; sessions are kept in memory");
            let store = MemoryStore::new();
            run_command(TriageService::new(store.clone(), store), command, false).await
        }
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run_command<S, D>(
    service: TriageService<S, D>,
    command: Command,
    persistent: bool,
) -> Result<()>
where
    S: SessionStore,
    D: DiagnosticStore,
{
    match command {
        Command::Score {
            symptoms,
            weight,
            rdt,
            patient,
            relais,
            save,
        } => {
            let raw = if symptoms == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                symptoms
            };
            if save && !persistent {
                tracing::warn!("no bucket configured; the saved session is discarded on exit");
            }
            let request = BlockTriageRequest {
                symptoms: serde_json::from_str(&raw)?,
                weight_kg: weight,
                rdt_result: rdt,
                patient_id: patient,
                relais_id: relais,
                save,
            };
            let response = service.triage_block(request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Interview {
            patient,
            relais,
            weight,
            rdt,
        } => {
            let params = StartParams {
                patient_id: patient,
                relais_id: relais,
                weight_kg: weight,
                rdt_result: rdt,
            };
            let mut input = std::io::stdin().lock();
            let mut output = std::io::stdout();
            interview::run_interview(&service, params, &mut input, &mut output).await?;
        }
        Command::Session { id } => {
            require_bucket(persistent)?;
            let session = service.get_session(id).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Command::LatestDiagnostic { patient } => {
            require_bucket(persistent)?;
            match service.latest_diagnostic(patient).await? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => eprintln!("no diagnostic recorded for patient {patient}"),
            }
        }
        Command::Config(cmd) => run_config(cmd)?,
    }
    Ok(())
}

fn require_bucket(persistent: bool) -> Result<()> {
    if persistent {
        Ok(())
    } else {
        Err(eyre::eyre!(
            "no bucket configured; run `palu config init --bucket <name>` or set PALU_BUCKET"
        ))
    }
}

fn run_config(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            if config::config_file()?.is_none() {
                eprintln!("no config file; showing defaults");
            }
            let cfg = PaluConfig::load_effective()?;
            println!("{}", serde_json::to_string_pretty(&ConfigInfo::from(&cfg))?);
        }
        ConfigCommand::Init {
            region,
            bucket,
            profile,
        } => {
            let credentials = match profile {
                Some(profile_name) => CredentialSource::Profile { profile_name },
                None => CredentialSource::DefaultChain,
            };
            let path = config::config_path()?;
            PaluConfig::new(region, bucket, credentials).save(&path)?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
