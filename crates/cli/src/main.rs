use clap::{Parser, Subcommand};
use tflow_core::constants::DEFAULT_RECENT_LIMIT;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tflow")]
#[command(about = "T-Flow AI medical triage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Triage a single symptom description
    Triage {
        /// Symptom description
        symptoms: String,
        /// Use keyword rules only, skipping the language model
        #[arg(long)]
        no_ai: bool,
        /// Patient age, stored with the record
        #[arg(long)]
        age: Option<u32>,
    },
    /// Flag a set of vital signs
    Vitals {
        /// Pulse (bpm)
        pulse: i32,
        /// Systolic blood pressure (mmHg)
        systolic: i32,
        /// Diastolic blood pressure (mmHg)
        diastolic: i32,
    },
    /// Show recent triage and vitals records
    Records {
        /// Number of records of each kind (1-100)
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT as i64)]
        limit: i64,
    },
    /// Triage every non-empty line of a file
    Batch {
        /// File with one symptom description per line
        file: std::path::PathBuf,
    },
    /// Interactive triage session
    Interactive,
    /// Check configuration and store connectivity
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Warnings only, so command output stays readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tflow=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Triage {
            symptoms,
            no_ai,
            age,
        } => commands::triage(&symptoms, !no_ai, age).await,
        Commands::Vitals {
            pulse,
            systolic,
            diastolic,
        } => commands::vitals(pulse, systolic, diastolic).await,
        Commands::Records { limit } => commands::records(limit).await,
        Commands::Batch { file } => commands::batch(&file).await,
        Commands::Interactive => commands::interactive().await,
        Commands::Check => commands::check().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("tflow").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_triage_flags() {
        assert_eq!(
            parse(&["triage", "mild headache", "--no-ai", "--age", "42"]),
            Commands::Triage {
                symptoms: "mild headache".into(),
                no_ai: true,
                age: Some(42),
            }
        );
    }

    #[test]
    fn records_limit_defaults_to_ten() {
        assert_eq!(parse(&["records"]), Commands::Records { limit: 10 });
    }

    #[test]
    fn vitals_takes_three_numbers() {
        assert_eq!(
            parse(&["vitals", "120", "180", "95"]),
            Commands::Vitals {
                pulse: 120,
                systolic: 180,
                diastolic: 95,
            }
        );
        assert!(Cli::try_parse_from(["tflow", "vitals", "120", "180"]).is_err());
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["tflow"]).is_err());
    }
}
