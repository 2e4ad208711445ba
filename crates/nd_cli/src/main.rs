use anyhow::Context;
use clap::Parser;
use nd_scrapers::cli::{handle_command, DigestArgs};

/// Collect recent AI news from syndication feeds and print a summarized digest.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    args: DigestArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let report = handle_command(cli.args)
        .await
        .context("newsdigest failed")?;
    println!("{report}");
    Ok(())
}
