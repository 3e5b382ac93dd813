mod check;
mod cli;
mod error;

use clap::Parser;

use crate::cli::Cli;
use crate::cli::Executable;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_max_level(cli.verbosity().tracing_level_filter())
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();

  cli.execute().await
}
