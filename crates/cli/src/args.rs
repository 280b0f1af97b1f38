use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};

use crate::parsers::{parse_positive_usize, parse_thread_count};

/// Top-level CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "keystats",
    version = crate::VERSION,
    about = "Per-key min/mean/max over a `<key>;<value>` file",
    group(
        ArgGroup::new("source")
            .args(["input", "latest_in"])
            .required(true)
            .multiple(false)
    )
)]
pub struct Args {
    /// Input file of `<key>;<value>` lines
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Process the newest file in DIR whose name starts with --prefix
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub latest_in: Option<PathBuf>,

    /// File name prefix used with --latest-in
    #[arg(long, default_value = "testcase_")]
    pub prefix: String,

    /// Number of byte ranges to split the input into (default: 2 x logical CPUs)
    #[arg(short, long, value_parser = parse_positive_usize)]
    pub workers: Option<usize>,

    /// Scan thread pool size (default: logical CPUs)
    #[arg(short = 'j', long, value_parser = parse_thread_count)]
    pub threads: Option<usize>,

    /// Write results to FILE instead of stdout
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Report elapsed processing time on stderr
    #[arg(long)]
    pub timing: bool,
}
