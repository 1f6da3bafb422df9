use clap::Parser;
use tsd_common::FormatCodeSettings;

use crate::tracing_config::LogFormat;

/// CLI arguments for the tsd-server binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsd-server",
    version,
    about = "Destructuring refactors over a line-delimited JSON protocol"
)]
pub struct ServerArgs {
    /// Indent size for printed code when a request does not supply one.
    #[arg(long = "indent-size", alias = "indentSize")]
    pub indent_size: Option<u32>,

    /// Tracing output format; overrides TSD_LOG_FORMAT.
    #[arg(long = "log-format", value_enum, ignore_case = true)]
    pub log_format: Option<LogFormat>,
}

impl ServerArgs {
    /// Project-wide formatting preferences from the command line.
    pub fn format_settings(&self) -> FormatCodeSettings {
        FormatCodeSettings {
            indent_size: self.indent_size,
        }
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
