use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Filter layout selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleArg {
    /// HTK mel scale between --freq-min and --freq-max.
    Htk,
    /// Slaney auditory-toolbox layout (13 linear + 27 log filters).
    Slaney,
}

/// Build a mel/Slaney filterbank and apply it to magnitude spectra.
#[derive(Parser, Debug, Default)]
#[command(name = "melbank", version, about)]
pub struct Cli {
    /// TOML configuration file. Flags below override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of filters.
    #[arg(short = 'n', long)]
    pub filters: Option<usize>,

    /// Spectral frame length in bins.
    #[arg(short, long)]
    pub win_size: Option<usize>,

    /// Sample rate in Hz.
    #[arg(short, long)]
    pub samplerate: Option<u32>,

    /// Lowest frequency (Hz), HTK only.
    #[arg(long)]
    pub freq_min: Option<f32>,

    /// Highest frequency (Hz), HTK only.
    #[arg(long)]
    pub freq_max: Option<f32>,

    /// Filter layout.
    #[arg(long, value_enum)]
    pub scale: Option<ScaleArg>,

    /// Area-normalised HTK triangles instead of equal gain.
    #[arg(long)]
    pub equal_area: bool,

    /// Dump the weight table (default file: filterbank.txt).
    #[arg(long, num_args = 0..=1, default_missing_value = mb_filterbank::DUMP_FILE_NAME)]
    pub dump: Option<PathBuf>,

    /// Text file of magnitude frames, one whitespace-separated frame per line.
    /// Log energies are printed to stdout, one line per frame.
    #[arg(long)]
    pub spectra: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "melbank",
            "-n",
            "26",
            "--win-size",
            "1024",
            "--scale",
            "htk",
            "--equal-area",
            "--dump",
        ])
        .unwrap();
        assert_eq!(cli.filters, Some(26));
        assert_eq!(cli.win_size, Some(1024));
        assert_eq!(cli.scale, Some(ScaleArg::Htk));
        assert!(cli.equal_area);
        assert_eq!(cli.dump, Some(PathBuf::from("filterbank.txt")));
    }

    #[test]
    fn dump_accepts_explicit_path() {
        let cli = Cli::try_parse_from(["melbank", "--dump", "/tmp/fb.txt"]).unwrap();
        assert_eq!(cli.dump, Some(PathBuf::from("/tmp/fb.txt")));
    }

    #[test]
    fn rejects_unknown_scale() {
        assert!(Cli::try_parse_from(["melbank", "--scale", "bark"]).is_err());
    }
}
