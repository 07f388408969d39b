//! CLI entry point for the image to tiles converter

use clap::Parser;
use imagetiles::io::cli::{Cli, FileProcessor};

fn main() -> imagetiles::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
