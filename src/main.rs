use std::process::ExitCode;
use tasktally::commands::Cli;
use tasktally::libs::error::Error;
use tasktally::libs::messages::{macros::is_debug_mode, Message};
use tasktally::msg_error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasktally=debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            msg_error!(format!("{error:#}"));
            if is_fatal(&error) {
                msg_error!(Message::UnexpectedFailure);
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

/// Expected failures (bad input, unknown ids, refused operations, bad files)
/// are reported and the process still exits cleanly. Only a damaged or
/// unreadable store produces a failing exit code.
fn is_fatal(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<Error>(),
        Some(Error::Integrity(_) | Error::NotInitialized(_) | Error::Sqlite(_))
    )
}
