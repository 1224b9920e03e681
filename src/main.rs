use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use population_predictor::config::Config;
use population_predictor::constants::DEFAULT_CONFIG_PATH;
use population_predictor::web::{self, AppState};
use population_predictor::{cli, logging, metrics, PopulationPredictor, RawInput};

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[derive(Parser)]
#[command(name = "population_predictor")]
#[command(about = "World Bank population predictor")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the prediction form over HTTP
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Predict once from the command line
    Predict {
        /// Country code, e.g. KEN
        #[arg(long)]
        code: String,
        /// Year, e.g. 2020
        #[arg(long)]
        year: i64,
        /// Country ID, e.g. KE
        #[arg(long)]
        id: String,
        /// Country name, e.g. Kenya
        #[arg(long)]
        name: String,
    },
    /// Print the feature names the model expects
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let args = Cli::parse();
    let mut config = Config::load_from(&args.config)?;

    let predictor = PopulationPredictor::load(&config.model.path);
    print_lines(&cli::status_lines(&predictor));

    match args.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            metrics::init_metrics();
            info!(model = %config.model.path.display(), "starting web server");
            web::serve(AppState::new(predictor), &config.server).await?;
        }
        Commands::Predict { code, year, id, name } => {
            let outcome = cli::run_predict(&predictor, &RawInput::new(code, year, id, name));
            print_lines(&outcome.lines);
            outcome.result?;
        }
        Commands::Schema => print_lines(&cli::schema_lines(&predictor)),
    }

    Ok(())
}
