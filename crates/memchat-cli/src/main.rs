mod config;
mod repl;

use anyhow::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    memchat_logging::init_logging(&config.logging.level)?;

    // Run the chat session
    repl::run(config).await
}
