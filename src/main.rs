use std::process;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use env_logger::Env;

use split_comment::utils::ensure_directory;
use split_comment::{build_options, collect_targets, run_split, Args, SplitError};

fn print_usage() {
    let mut cmd = Args::command();
    println!("{}", cmd.render_help());
}

fn run(args: Args) -> Result<()> {
    let opts = build_options(&args)?;
    ensure_directory(&args.output_dir)?;

    let targets = collect_targets(&args.inputs, &args.output_dir, &opts.ignore_patterns);
    let counters = run_split(&targets, &args.output_dir, &opts, |preview| print!("{preview}"))?;

    if opts.dry_run {
        println!("== DRY RUN ==");
    }
    println!("== split-comment ({}): Summary ==", opts.filter.output.flag());
    println!("Files:                {}", counters.files);
    if opts.dry_run {
        println!("Would write:          {}", counters.would_write);
    } else {
        println!("Written:              {}", counters.written);
    }
    println!("Unchanged (skipped):  {}", counters.unchanged);
    println!("Lines read:           {}", counters.lines_read);
    println!("Lines emitted:        {}", counters.lines_emitted);
    println!("Lines suppressed:     {}", counters.lines_suppressed);
    println!("Tags stripped:        {}", counters.tags_stripped);
    println!("Output at:            {:?}", args.output_dir);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if std::env::args_os().len() <= 1 {
        print_usage();
        process::exit(1);
    }

    let args = Args::parse();
    if let Err(err) = run(args) {
        match err.downcast_ref::<SplitError>() {
            Some(SplitError::DirectoryNotFound(_)) => println!("{err}"),
            _ => eprintln!("Error: {err:#}"),
        }
        process::exit(1);
    }
}
