use crate::commands::{
    run_error_classify, run_listing_preview, run_listing_validate, ErrorClassifyArgs,
    ListingInputArgs, ListingPreviewArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use estatehub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "estatehub",
    about = "Check, shape, and serve marketplace listing submissions",
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
    /// Work with saved listing wizard state
    Listing {
        #[command(subcommand)]
        command: ListingCommand,
    },
    /// Explain how a failed API call would be shown to a user
    Error {
        #[command(subcommand)]
        command: ErrorCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ListingCommand {
    /// Validate wizard state and print the JSON payload or multipart fields
    Preview(ListingPreviewArgs),
    /// Print the validation checklist result for wizard state
    Validate(ListingInputArgs),
}

#[derive(Subcommand, Debug)]
enum ErrorCommand {
    /// Classify an HTTP status or transport error
    Classify(ErrorClassifyArgs),
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
        Command::Listing {
            command: ListingCommand::Preview(args),
        } => run_listing_preview(args),
        Command::Listing {
            command: ListingCommand::Validate(args),
        } => run_listing_validate(args),
        Command::Error {
            command: ErrorCommand::Classify(args),
        } => {
            run_error_classify(args);
            Ok(())
        }
    }
}
