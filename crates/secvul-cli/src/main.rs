//! secvul - vulnerability-fix method pairs and benchmark samples
//!
//! ## Commands
//!
//! - `export`: stream before/after method pairs out of a CVEfixes store,
//!   dropping pairs that only differ in comments or whitespace
//! - `samples`: load CVEfixes, Juliet or OWASP samples and print a
//!   selection as JSON lines

mod args;
mod export;
mod progress;
mod samples;

use std::process::ExitCode;

use clap::Parser;
use secvul_core::errors::{ConfigError, DatasetError, ErrorCode, ExportError};

use crate::args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    secvul_core::tracing::init_tracing(cli.verbose, cli.json_logs);

    let result = match &cli.command {
        Commands::Export(args) => export::run(&cli, args),
        Commands::Samples(args) => samples::run(&cli, args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

/// Outer context followed by `[CODE] message` of the first coded error in
/// the chain. Errors without a code print their whole chain.
fn describe(err: &anyhow::Error) -> String {
    let coded = err.chain().enumerate().find_map(|(depth, cause)| {
        let coded = cause
            .downcast_ref::<ExportError>()
            .map(|e| e.coded_string())
            .or_else(|| cause.downcast_ref::<DatasetError>().map(|e| e.coded_string()))
            .or_else(|| cause.downcast_ref::<ConfigError>().map(|e| e.coded_string()))?;
        Some((depth, coded))
    });
    match coded {
        Some((0, coded)) => coded,
        Some((_, coded)) => format!("{err}: {coded}"),
        None => format!("{err:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn coded_errors_keep_their_outer_context() {
        let err = Err::<(), _>(ExportError::from(ConfigError::MissingValue {
            field: "export.db_path".to_string(),
        }))
        .context("export failed")
        .unwrap_err();
        assert_eq!(
            describe(&err),
            "export failed: [CONFIG_ERROR] Configuration error: Missing required config value: export.db_path"
        );
    }

    #[test]
    fn bare_coded_error_is_printed_once() {
        let err = anyhow::Error::new(DatasetError::UnknownIndex {
            index: "7".to_string(),
        });
        assert_eq!(describe(&err), "[DATASET_ERROR] Unknown sample index: 7");
    }

    #[test]
    fn uncoded_errors_print_the_whole_chain() {
        let err = anyhow::anyhow!("disk gone").context("cannot write");
        assert_eq!(describe(&err), "cannot write: disk gone");
    }
}
