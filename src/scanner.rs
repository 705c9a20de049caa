use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;
use walkdir::WalkDir;

/// One file to convert and where its copy goes, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub source: PathBuf,
    pub rel_out: PathBuf,
}

fn is_ignored(rel: &Path, patterns: &[Pattern]) -> bool {
    let name = rel.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if [".git", ".svn", "__pycache__", ".DS_Store", "Thumbs.db"].contains(&name) {
        return true;
    }
    let s_rel = rel.to_string_lossy().replace('\\', "/");
    for pat in patterns {
        if pat.matches(&s_rel) || pat.matches(name) {
            return true;
        }
    }
    false
}

fn scan_dir(root: &Path, out_root: &Path, patterns: &[Pattern], targets: &mut Vec<Target>) {
    let canon_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    for entry in walker.filter_entry(|e| match e.path().strip_prefix(root) {
        Ok(rel) if rel == Path::new("") => true,
        Ok(rel) if canon_root.join(rel).starts_with(out_root) => {
            debug!("skipping output directory entry {}", e.path().display());
            false
        }
        Ok(rel) => !is_ignored(rel, patterns),
        Err(_) => true,
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            targets.push(Target {
                source: entry.path().to_path_buf(),
                rel_out: rel.to_path_buf(),
            });
        }
    }
}

/// Expands the command line inputs in the order given.
///
/// Plain paths map to `<basename>`; directories are walked and keep their
/// inner layout. Anything that is not a directory is queued as a file so that
/// a missing input fails when it is read. Entries under `out_root` are never
/// picked up from a directory walk.
pub fn collect_targets(inputs: &[PathBuf], out_root: &Path, patterns: &[Pattern]) -> Vec<Target> {
    let out_root = out_root
        .canonicalize()
        .unwrap_or_else(|_| out_root.to_path_buf());
    let mut targets = Vec::new();
    for input in inputs {
        if input.is_dir() {
            scan_dir(input, &out_root, patterns, &mut targets);
            continue;
        }
        let rel_out = input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| input.clone());
        targets.push(Target {
            source: input.clone(),
            rel_out,
        });
    }
    targets
}
