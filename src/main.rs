use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use redline::segment;

#[derive(Parser, Debug)]
#[command(name = "redline")]
#[command(about = "Sentence segmentation front-end for the incremental correction engine")]
#[command(version)]
struct Args {
    /// UTF-8 text file to segment into sentence units
    input: PathBuf,

    /// Emit one JSON object per sentence instead of numbered text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    // WHY: validate input exists early to fail fast with clear error
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    info!("Reading {}", args.input.display());
    let text = tokio::fs::read_to_string(&args.input).await?;

    let sentences: Vec<&str> = segment(&text).collect();
    info!(
        sentences = sentences.len(),
        chars = text.chars().count(),
        "Segmentation complete"
    );

    for (index, sentence) in sentences.iter().enumerate() {
        if args.json {
            println!(
                "{}",
                serde_json::json!({ "index": index, "sentence": sentence })
            );
        } else {
            println!("{index}\t{sentence}");
        }
    }

    Ok(())
}
