use std::path::PathBuf;
use clap::{ArgGroup, Parser, ValueEnum};
use pagesim::{
    input::{self, ParseError, Preset, MAX_FRAMES, MIN_FRAMES},
    PolicyKind,
};

#[derive(Parser, Debug)]
#[command(name = "pagesim", version, about = "Page replacement simulator (FIFO, LRU, OPT)")]
#[command(group(ArgGroup::new("source").required(true).args(["reference", "file", "preset"])))]
pub struct Cli {
    #[arg(default_value = "3")]
    pub frames: String,

    #[arg(value_enum, default_value_t = PageReplacementAlgorithm::Fifo)]
    pub pra: PageReplacementAlgorithm,

    /// Page numbers separated by spaces or commas
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Read the reference string from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Use a built-in reference string
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Run every algorithm and print their totals
    #[arg(short, long)]
    pub compare: bool,

    /// Print fault counts for 1..=MAX frames
    #[arg(
        short,
        long,
        value_name = "MAX",
        conflicts_with = "compare",
        value_parser = sweep_bound
    )]
    pub sweep: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(short, long)]
    pub debug: bool,
}

// Strict all caps CLI matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageReplacementAlgorithm {
    #[value(name = "FIFO")]
    Fifo,
    #[value(name = "LRU")]
    Lru,
    #[value(name = "OPT")]
    Opt,
}

impl From<PageReplacementAlgorithm> for PolicyKind {
    fn from(pra: PageReplacementAlgorithm) -> Self {
        match pra {
            PageReplacementAlgorithm::Fifo => PolicyKind::Fifo,
            PageReplacementAlgorithm::Lru => PolicyKind::Lru,
            PageReplacementAlgorithm::Opt => PolicyKind::Optimal,
        }
    }
}

/// The sweep bound is a frame count, so it gets the same limits.
fn sweep_bound(text: &str) -> Result<usize, ParseError> {
    input::validate_frames(text, MIN_FRAMES, MAX_FRAMES)
}
