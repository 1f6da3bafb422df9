//! tsd-server: destructuring refactors over a line-delimited JSON protocol.
//!
//! ```bash
//! echo '{"type":"open","id":1,"file":"a.ts","text":"const a = { b: 1 };\na;"}' | tsd-server
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufReader;
use tsd_cli::{Server, ServerArgs, tracing_config};

fn main() -> Result<()> {
    let args = ServerArgs::parse();
    tracing_config::init_tracing(args.log_format);
    tracing::info!(indent_size = ?args.indent_size, "tsd-server ready");

    let mut server = Server::new(args.format_settings());
    server
        .run(BufReader::new(std::io::stdin()), std::io::stdout())
        .context("server loop failed")
}
