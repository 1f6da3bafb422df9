//! Tracing configuration for `tsd-server`.
//!
//! Output format comes from `--log-format` or `TSD_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: hierarchical indented output via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ```bash
//! TSD_LOG=debug TSD_LOG_FORMAT=tree tsd-server
//! TSD_LOG="tsd_refactor=trace" tsd-server --log-format json
//! ```
//!
//! The subscriber is only installed when `TSD_LOG` (or `RUST_LOG`) is set.
//! Everything is written to stderr; stdout carries the protocol.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Standard flat text lines.
    #[default]
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::from_name(&std::env::var("TSD_LOG_FORMAT").unwrap_or_default())
    }
}

/// `TSD_LOG` wins over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("TSD_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber. `format` overrides `TSD_LOG_FORMAT`.
pub fn init_tracing(format: Option<LogFormat>) {
    if std::env::var("TSD_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match format.unwrap_or_else(LogFormat::from_env) {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(LogFormat::from_name("TREE"), LogFormat::Tree);
        assert_eq!(LogFormat::from_name(" json "), LogFormat::Json);
        assert_eq!(LogFormat::from_name("text"), LogFormat::Text);
    }

    #[test]
    fn unknown_format_falls_back_to_text() {
        assert_eq!(LogFormat::from_name(""), LogFormat::Text);
        assert_eq!(LogFormat::from_name("yaml"), LogFormat::Text);
    }
}
