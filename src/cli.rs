// src/cli.rs
// =============================================================================
// Command-line interface, parsed with clap's derive API.
//
//   mini-spider -c ./conf -l ./log
//   mini-spider -v               (print the version and exit)
//   mini-spider -d               (debug logging)
//
// clap generates --help; -v/--version replaces clap's -V/--version.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mini-spider",
    version,
    disable_version_flag = true,
    about = "A polite, bounded-concurrency batch web crawler",
    long_about = "mini-spider crawls outward from a list of seed URLs up to a fixed depth, \
                  saving every page whose URL matches a pattern. Requests to the same host \
                  are spaced out and no URL is fetched twice."
)]
pub struct Cli {
    /// Directory holding spider.yaml
    #[arg(short = 'c', long = "conf", default_value = "./conf")]
    pub conf_dir: PathBuf,

    /// Directory the log file is written to
    #[arg(short = 'l', long = "log", default_value = "./log")]
    pub log_dir: PathBuf,

    /// Log debug output
    #[arg(short = 'd', long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    _version: Option<bool>,
}
