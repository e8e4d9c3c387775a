use std::fs::File;
use std::io::{self, BufReader};

use anyhow::Context;
use clap::Parser;
use mb_app::cli::Cli;
use mb_app::pipeline;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = pipeline::resolve_config(&cli)?;
    let bank = pipeline::build_bank(&config)?;

    if let Some(ref path) = cli.dump {
        log::info!("Dumping filterbank to {}", path.display());
        bank.dump(path);
    }

    if let Some(ref path) = cli.spectra {
        let file =
            File::open(path).with_context(|| format!("Impossible d'ouvrir {}", path.display()))?;
        let frames = pipeline::process_frames(&bank, BufReader::new(file), io::stdout().lock())?;
        log::info!("{frames} frames from {}", path.display());
    }

    Ok(())
}
