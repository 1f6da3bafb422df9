//! `tsd-server` support: argument parsing, the line protocol, the request
//! loop and tracing setup.

pub mod args;
pub mod protocol;
pub mod server;
pub mod tracing_config;

pub use args::ServerArgs;
pub use server::Server;
