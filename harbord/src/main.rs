use clap::{Parser, Subcommand};
use rst_common::with_tokio::tokio;
use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

mod errors;
mod svc;

use errors::HarborError;
use svc::store::Store;

#[derive(Parser)]
#[command(name = "harbord")]
#[command(version = "0.1")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "records")]
    #[command(about = "List stored record names for one record kind")]
    Records {
        #[arg(short, long, value_name = "FILE")]
        #[arg(required = true)]
        config: Option<String>,

        #[arg(short, long, value_name = "KIND")]
        #[arg(required = true)]
        kind: Option<String>,
    },

    #[command(name = "show")]
    #[command(about = "Print one stored record as JSON")]
    Show {
        #[arg(short, long, value_name = "FILE")]
        #[arg(required = true)]
        config: Option<String>,

        #[arg(short, long, value_name = "KIND")]
        #[arg(required = true)]
        kind: Option<String>,

        #[arg(short, long, value_name = "NAME")]
        #[arg(required = true)]
        name: Option<String>,
    },

    #[command(name = "provision")]
    #[command(about = "Print the agent provision record")]
    Provision {
        #[arg(short, long, value_name = "FILE")]
        #[arg(required = true)]
        config: Option<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), HarborError> {
    init_tracing();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Records { config, kind } => {
            let store = Store::new(config.to_owned().unwrap());
            store.records(kind.to_owned().unwrap().as_str()).await?;
        }
        Commands::Show { config, kind, name } => {
            let store = Store::new(config.to_owned().unwrap());
            store
                .show(
                    kind.to_owned().unwrap().as_str(),
                    name.to_owned().unwrap().as_str(),
                )
                .await?;
        }
        Commands::Provision { config } => {
            let store = Store::new(config.to_owned().unwrap());
            store.provision().await?;
        }
    }

    Ok(())
}
