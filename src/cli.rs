use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use glob::Pattern;

use crate::comment::OutputMode;
use crate::filter::FilterOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("language").required(true).args(["english", "japanese"])))]
pub struct Args {
    /// Output english comment
    #[arg(short = 'e', long)]
    pub english: bool,

    /// Output Japanese comment
    #[arg(short = 'j', long)]
    pub japanese: bool,

    /// Source files or directories to convert
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Existing directory that receives the converted copies
    pub output_dir: PathBuf,

    /// Glob patterns to skip inside directory inputs (can be repeated or comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Treat `\~english` sections as japanese, like the original script
    #[arg(long)]
    pub legacy_english_tag: bool,

    /// Print a unified diff of every file that the filter changes
    #[arg(long)]
    pub diff: bool,

    /// Do not write anything; only print a summary of what would be done
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct Options {
    pub filter: FilterOptions,
    pub ignore_patterns: Vec<Pattern>,
    pub show_diff: bool,
    pub dry_run: bool,
}

impl Args {
    pub fn output_mode(&self) -> OutputMode {
        if self.japanese {
            OutputMode::Japanese
        } else {
            OutputMode::English
        }
    }
}

pub fn build_options(args: &Args) -> Result<Options> {
    let patterns = args
        .ignore
        .iter()
        .map(|s| Pattern::new(s).with_context(|| format!("Invalid glob pattern: {s}")))
        .collect::<Result<Vec<_>>>()?;

    Ok(Options {
        filter: FilterOptions {
            output: args.output_mode(),
            legacy_english_tag: args.legacy_english_tag,
        },
        ignore_patterns: patterns,
        show_diff: args.diff,
        dry_run: args.dry_run,
    })
}
