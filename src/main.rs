use clap::{Parser, Subcommand};
use consolidate::api::{PlanArgs, plan_report, run_http_server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "consolidate",
    version,
    about = "Credit card payoff vs consolidation loan projections"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print payoff, consolidation and investment projections as JSON
    Plan(PlanArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Plan(args) => match plan_report(args) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "invalid plan arguments");
                std::process::exit(1);
            }
        },
    }
}
