mod catalog;
mod channel;
mod config;
mod device;
mod matcher;
mod remote;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use bpaf::Bpaf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use tvbridge_bravia::BraviaClient;

use crate::config::Config;
use crate::device::Device;
use crate::remote::Remote;
use crate::server::serve;

#[derive(Bpaf, Clone, Debug)]
#[bpaf(options)]
struct Options {
    /// Perform verbose logging
    #[bpaf(short, long)]
    verbose: bool,

    /// Path to the configuration file
    #[bpaf(argument("PATH"), fallback(PathBuf::from("./config.toml")))]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = options().run();

    let env_filter = EnvFilter::builder()
        .with_default_directive(
            match options.verbose {
                true => LevelFilter::TRACE,
                _ => LevelFilter::INFO,
            }
            .into(),
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let config = Config::load_from_file(&options.config)?;

    if config.auth.key.len() < 32 {
        bail!("The auth key must be at least 32 characters to start the bridge.");
    }

    let device: Arc<dyn Device> =
        Arc::new(BraviaClient::new(&config.device.host, &config.device.psk));
    let remote = Arc::new(Remote::new(device, &config.device));

    serve(config.server.address, config.auth.key.clone(), remote).await
}
