use pts_core::logging;
use pts_core::retry::Exhausted;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        if err.chain().any(|c| c.downcast_ref::<Exhausted>().is_some()) {
            eprintln!("Error: {}", Exhausted);
        } else {
            eprintln!("pts error: {:#}", err);
        }
        std::process::exit(1);
    }
}
