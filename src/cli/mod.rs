mod view;
mod wizard;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::GeminiGateway;
use crate::workflow::Session;

#[derive(Parser, Debug)]
#[command(
    name = "brandloom",
    version,
    about = "AI campaign material generator for F&B private-domain marketing"
)]
pub struct Cli {
    /// Gemini API key (overrides config and environment).
    #[arg(long)]
    pub api_key: Option<String>,

    /// Directory generated posters are written to.
    #[arg(long, default_value = "brandloom-output")]
    pub output_dir: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let api_key = cli.api_key.as_deref().or(config.api_key.as_deref());
    let gateway = GeminiGateway::new(&config.gateway, api_key);
    let session = Session::new(Arc::new(gateway));
    wizard::run(session, &cli.output_dir).await?;
    Ok(())
}
