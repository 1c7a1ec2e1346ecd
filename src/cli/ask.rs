//! Default command: translate a request into a shell command.

use anyhow::Result;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::query::{QueryClient, extract_command};
use crate::utils::Spinner;

pub async fn execute(query: &str, config: &GlobalConfig) -> Result<()> {
    let client = QueryClient::new(config)?;

    let spinner = Spinner::start("Thinking...");
    let reply = client.ask(query).await;
    spinner.finish_and_clear();
    let reply = reply?;

    debug!("Model reply: {}", reply);
    println!("{}", extract_command(&reply));
    Ok(())
}
