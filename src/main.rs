use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use canvas_loader::{png_export, BufferSizing, LoaderConfig};

#[derive(Parser)]
#[command(
    name = "canvas_loader",
    about = "Load an image into a drawable buffer and save it as png"
)]
struct Cli {
    /// Image to load: a path, a file:// or a data: URI
    src: String,
    /// Where to write the content of the buffer
    output: PathBuf,
    /// Json file with the loader settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Draw into a 512x512 buffer instead of one with the size of the image
    #[arg(long)]
    fixed: bool,
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    if cli.fixed {
        config.sizing = BufferSizing::FIXED_512;
    }

    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()
        .context("Failed to initialize logging")?;

    let loader = config.build_loader()?;
    let buffer = loader.load(&cli.src).await;
    png_export::save_png(&buffer, &cli.output)?;

    println!(
        "{}x{} -> {}",
        buffer.width(),
        buffer.height(),
        cli.output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    async_std::task::block_on(run(cli))
}
