use std::path::Path;

use anyhow::Result;
use log::{debug, info};

use crate::cli::Options;
use crate::diff::render_preview;
use crate::filter::filter_bytes;
use crate::scanner::Target;
use crate::utils::{file_matches, read_source, write_output};

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Counters {
    pub files: usize,
    pub written: usize,
    pub unchanged: usize,
    pub would_write: usize,
    pub lines_read: usize,
    pub lines_emitted: usize,
    pub lines_suppressed: usize,
    pub tags_stripped: usize,
}

/// Filters every target into `out_root`, stopping at the first I/O failure.
///
/// Previews produced by `--diff` are handed to `on_preview` in target order.
pub fn run_split(
    targets: &[Target],
    out_root: &Path,
    opts: &Options,
    mut on_preview: impl FnMut(&str),
) -> Result<Counters> {
    let mut counters = Counters::default();

    for target in targets {
        let input = read_source(&target.source)?;
        let (output, stats) = filter_bytes(&input, &opts.filter);
        let dst = out_root.join(&target.rel_out);

        debug!(
            "{} -> {}: {} lines, {} suppressed, {} tags",
            target.source.display(),
            dst.display(),
            stats.lines_read,
            stats.lines_suppressed,
            stats.tags_stripped
        );

        counters.files += 1;
        counters.lines_read += stats.lines_read;
        counters.lines_emitted += stats.lines_emitted;
        counters.lines_suppressed += stats.lines_suppressed;
        counters.tags_stripped += stats.tags_stripped;

        if opts.show_diff {
            if let Some(preview) = render_preview(&target.source, &input, &output) {
                on_preview(&preview);
            }
        }

        if file_matches(&dst, &output) {
            debug!("{} is up to date", dst.display());
            counters.unchanged += 1;
            continue;
        }
        if opts.dry_run {
            debug!("would write {}", dst.display());
            counters.would_write += 1;
            continue;
        }
        write_output(&dst, &output)?;
        counters.written += 1;
    }

    info!(
        "converted {} file(s) with {}: {} written, {} unchanged",
        counters.files,
        opts.filter.output.flag(),
        counters.written,
        counters.unchanged
    );
    Ok(counters)
}
