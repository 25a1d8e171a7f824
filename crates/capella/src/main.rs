mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terraform-provider-capella")]
#[command(about = "Couchbase Capella infrastructure provider", long_about = None)]
struct Cli {
    /// プロバイダー設定 (JSON)。未指定の項目は CBC_* 環境変数から解決
    #[arg(long, global = true, value_name = "FILE")]
    provider_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the provider and resource schemas as JSON
    Schema,
    /// Create a resource from a JSON configuration
    Create {
        /// Resource type (e.g. couchbasecapella_project)
        resource_type: String,
        /// Resource configuration (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Write the unredacted state to this file
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Refresh a resource from its saved state
    Read {
        resource_type: String,
        /// Saved resource state (JSON)
        #[arg(short, long, value_name = "FILE")]
        state: PathBuf,
        /// Write the refreshed state to this file (removed if the resource is gone)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Delete a resource
    Delete {
        resource_type: String,
        /// Saved resource state (JSON)
        #[arg(short, long, value_name = "FILE")]
        state: PathBuf,
    },
    /// Show which attributes would force replacement
    Plan {
        resource_type: String,
        /// Saved resource state (JSON)
        #[arg(short, long, value_name = "FILE")]
        state: PathBuf,
        /// Desired configuration (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout は JSON 出力に使うので、ログは stderr へ
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("CAPELLA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let provider = capella_provider::provider();

    match cli.command {
        Commands::Version => {
            println!("terraform-provider-capella {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Schema => commands::schema::handle(&provider),
        Commands::Plan {
            resource_type,
            state,
            config,
        } => commands::plan::handle(&provider, &resource_type, &state, &config),
        Commands::Create {
            resource_type,
            config,
            out,
        } => {
            let configured = commands::configure(&provider, cli.provider_config.as_deref())?;
            commands::create::handle(&provider, &configured, &resource_type, &config, out.as_deref())
                .await
        }
        Commands::Read {
            resource_type,
            state,
            out,
        } => {
            let configured = commands::configure(&provider, cli.provider_config.as_deref())?;
            commands::read::handle(&provider, &configured, &resource_type, &state, out.as_deref())
                .await
        }
        Commands::Delete {
            resource_type,
            state,
        } => {
            let configured = commands::configure(&provider, cli.provider_config.as_deref())?;
            commands::delete::handle(&configured, &resource_type, &state).await
        }
    }
}
