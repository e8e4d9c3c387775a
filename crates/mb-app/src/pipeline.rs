use std::io::{BufRead, Write};

use anyhow::Context;
use mb_core::config::{FilterbankConfig, GainPolicy, Scale, SlaneyLayout};
use mb_filterbank::{FilterBank, LogObserver};

use crate::cli::{Cli, ScaleArg};

/// Resolve the construction config: file (or defaults), then CLI overrides.
///
/// Switching to `--scale slaney` sizes the bank from the layout unless
/// `--filters` is given explicitly.
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed.
///
/// # Example
/// ```
/// use mb_app::cli::Cli;
/// use mb_app::pipeline::resolve_config;
///
/// let cli = Cli { filters: Some(26), ..Cli::default() };
/// let config = resolve_config(&cli).unwrap();
/// assert_eq!(config.n_filters, 26);
/// assert_eq!(config.win_s, 512);
/// ```
pub fn resolve_config(cli: &Cli) -> anyhow::Result<FilterbankConfig> {
    let mut config = match &cli.config {
        Some(path) => FilterbankConfig::load(path)?,
        None => FilterbankConfig::default(),
    };

    match cli.scale {
        Some(ScaleArg::Htk) if !matches!(config.scale, Scale::Htk { .. }) => {
            config.scale = Scale::default();
        }
        Some(ScaleArg::Slaney) if !matches!(config.scale, Scale::Slaney(_)) => {
            let layout = SlaneyLayout::default();
            config.n_filters = layout.total_filters();
            config.scale = Scale::Slaney(layout);
        }
        _ => {}
    }

    if let Some(n) = cli.filters {
        config.n_filters = n;
    }
    if let Some(win_s) = cli.win_size {
        config.win_s = win_s;
    }
    if let Some(sr) = cli.samplerate {
        config.samplerate = sr;
    }
    if let Some(lo) = cli.freq_min {
        config.freq_min = lo;
    }
    if let Some(hi) = cli.freq_max {
        config.freq_max = hi;
    }
    if cli.equal_area {
        config = config.with_gain(GainPolicy::EqualArea);
    }
    Ok(config)
}

/// Build the bank, routing construction diagnostics to the logger.
///
/// # Errors
/// Returns an error if the parameters describe no valid filterbank.
pub fn build_bank(config: &FilterbankConfig) -> anyhow::Result<FilterBank> {
    let bank = FilterBank::build_with_observer(config, &mut LogObserver)
        .context("Construction du filterbank impossible")?;
    log::info!(
        "Filterbank: {} filters x {} bins ({:?})",
        bank.n_filters(),
        bank.win_s(),
        config.scale
    );
    Ok(bank)
}

/// Parse one whitespace-separated magnitude frame.
///
/// # Errors
/// Returns an error on any token that is not a number.
pub fn parse_frame(line: &str) -> anyhow::Result<Vec<f32>> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<f32>()
                .with_context(|| format!("Valeur invalide: {tok:?}"))
        })
        .collect()
}

/// Apply `bank` to every frame read from `input`, writing one line of log
/// energies per frame. Blank lines are skipped. Returns the number of frames.
///
/// # Errors
/// Returns an error on read/write failure or a malformed frame.
///
/// # Example
/// ```
/// use mb_core::config::FilterbankConfig;
/// use mb_filterbank::FilterBank;
/// use mb_app::pipeline::process_frames;
///
/// let bank = FilterBank::build(&FilterbankConfig::htk(4, 16, 16000, 0.0, 8000.0)).unwrap();
/// let mut out = Vec::new();
/// let n = process_frames(&bank, "0 0 0 0 0 0 0 0 0\n\n1 1 1 1 1 1 1 1 1\n".as_bytes(), &mut out).unwrap();
/// assert_eq!(n, 2);
/// assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
/// ```
pub fn process_frames<R: BufRead, W: Write>(
    bank: &FilterBank,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut energies = vec![0.0f32; bank.n_filters()];
    let mut frames = 0usize;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.context("Lecture des spectres impossible")?;
        if line.trim().is_empty() {
            continue;
        }
        let norm = parse_frame(&line).with_context(|| format!("Ligne {}", lineno + 1))?;
        if norm.len() > bank.win_s() {
            log::warn!(
                "Ligne {}: {} bins > win_s {}, extra bins ignored",
                lineno + 1,
                norm.len(),
                bank.win_s()
            );
        }
        bank.apply_norm(&norm, &mut energies);

        let row: Vec<String> = energies.iter().map(|e| format!("{e:.6}")).collect();
        writeln!(output, "{}", row.join(" "))?;
        frames += 1;
    }

    output.flush()?;
    log::debug!("{frames} frames processed");
    Ok(frames)
}
