use clap::Parser;
use std::net::SocketAddr;

/// Command line arguments for the gateway binary.
#[derive(Debug, Parser)]
#[command(
    name = "filegate",
    about = "HTTP gateway for copy/move/delete/exist operations on remote file and blob storage"
)]
pub struct Args {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "FILEGATE_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,
}
