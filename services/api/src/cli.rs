use crate::report::{run_narrative, run_regions_report, NarrativeCommand, RegionsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use health_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Regional Health Risk Service",
    about = "Serve regional health risk data and ministerial briefings from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the processed region table
    Regions(RegionsArgs),
    /// Generate a ministerial statement for one region or the whole country
    Narrative {
        #[command(subcommand)]
        command: NarrativeCommand,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve region records from this JSON file instead of the embedded dataset
    #[arg(long)]
    pub(crate) regions: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Regions(args) => run_regions_report(args),
        Command::Narrative { command } => run_narrative(command).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["health-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_narrative_alert_for_region() {
        let cli = Cli::try_parse_from(["health-risk-api", "narrative", "alert", "Souss-Massa"])
            .expect("parses");
        match cli.command {
            Some(Command::Narrative {
                command: NarrativeCommand::Alert(args),
            }) => assert_eq!(args.region, "Souss-Massa"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "health-risk-api",
            "serve",
            "--port",
            "8080",
            "--regions",
            "data/regions.json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.regions, Some(PathBuf::from("data/regions.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
