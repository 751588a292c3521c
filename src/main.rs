use clap::Parser;

use filegate::cli::Args;
use filegate::config::load_gateway_config;
use filegate::dispatch::Dispatcher;
use filegate::error::Result;
use filegate::server;
use filegate::storage::{OperationPolicy, StorageGateway};

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run_app(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_app(args: Args) -> Result<()> {
    let config = load_gateway_config()?;
    let gateway = StorageGateway::new(config);
    let dispatcher = Dispatcher::new(gateway, OperationPolicy::default());
    server::serve(args.bind, dispatcher).await?;
    Ok(())
}
