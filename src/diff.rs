use std::path::Path;

use similar::TextDiff;

use crate::utils::decode_best_effort;

/// Unified diff between a source file and its filtered copy, or `None` when
/// the filter left it untouched.
pub fn render_preview(source: &Path, before: &[u8], after: &[u8]) -> Option<String> {
    if before == after {
        return None;
    }
    let old = decode_best_effort(before);
    let new = decode_best_effort(after);
    let name = source.display().to_string();

    let diff = TextDiff::from_lines(old.as_ref(), new.as_ref());
    let rendered = diff
        .unified_diff()
        .context_radius(2)
        .header(&format!("{name} (original)"), &format!("{name} (filtered)"))
        .to_string();
    Some(rendered)
}
