use anyhow::Result;
use gatehouse::cli::{actions, start};
use std::process::ExitCode;

// Main function
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let (action, globals) = start()?;

    actions::handle(action, &globals).await
}
