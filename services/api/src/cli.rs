use crate::demo::{run_demo, run_score_batch, DemoArgs, ScoreBatchArgs};
use crate::server;
use aidscore::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Beneficiary Vulnerability Service",
    about = "Score household vulnerability and derive aggregate aid insights",
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
    /// Score beneficiary households from the command line
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Run an end-to-end demo: batch scoring plus all three aggregate analyses
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Batch-score households from a CSV export
    Batch(ScoreBatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score {
            command: ScoreCommand::Batch(args),
        } => run_score_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}
