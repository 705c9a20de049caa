//
// filter.rs
// split-comment
//
// Line-by-line state machine that keeps one language out of bilingual
// Doxygen comments. Operates on raw bytes so Shift_JIS sources survive intact.
//
// Thales Matheus Mendonça Santos - October 2026
//
use std::borrow::Cow;

use crate::comment::{
    find_block_tag, has_block_close, has_block_open, has_inline_trigger, is_blank,
    split_single_line, BlockTag, Mode, OutputMode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    pub output: OutputMode,
    /// Treat `\~english` as a japanese section, as the original script did.
    pub legacy_english_tag: bool,
}

impl FilterOptions {
    pub fn new(output: OutputMode) -> Self {
        Self {
            output,
            legacy_english_tag: false,
        }
    }

    fn mode_for(&self, tag: BlockTag) -> Mode {
        match tag {
            BlockTag::Japanese => Mode::Japanese,
            BlockTag::English if self.legacy_english_tag => Mode::Japanese,
            BlockTag::English => Mode::English,
            BlockTag::Reset => Mode::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Code,
    InBlockComment(Mode),
}

/// What a single line turned into.
#[derive(Debug, PartialEq, Eq)]
pub struct Step<'a> {
    pub state: State,
    pub line: Option<Cow<'a, [u8]>>,
    pub tag_stripped: bool,
}

/// Advances the filter by one line (terminator included).
///
/// `line: None` means the line is dropped from the output.
pub fn next_state<'a>(state: State, line: &'a [u8], opts: &FilterOptions) -> Step<'a> {
    match state {
        State::Code => code_line(line, opts),
        State::InBlockComment(mode) => comment_line(mode, line, opts),
    }
}

fn code_line<'a>(line: &'a [u8], opts: &FilterOptions) -> Step<'a> {
    if has_block_open(line) {
        if has_block_close(line) {
            return Step {
                state: State::Code,
                line: Some(split_single_line(line, opts.output)),
                tag_stripped: false,
            };
        }
        // The opener line itself is never filtered.
        return Step {
            state: State::InBlockComment(Mode::Both),
            line: Some(Cow::Borrowed(line)),
            tag_stripped: false,
        };
    }

    let line = if has_inline_trigger(line) {
        split_single_line(line, opts.output)
    } else {
        Cow::Borrowed(line)
    };
    Step {
        state: State::Code,
        line: Some(line),
        tag_stripped: false,
    }
}

fn comment_line<'a>(mode: Mode, line: &'a [u8], opts: &FilterOptions) -> Step<'a> {
    let (mode, line, tag_stripped) = match find_block_tag(line) {
        Some((tag, m)) => {
            let rest = m.splice();
            let rest = if is_blank(&rest) { None } else { Some(Cow::Owned(rest)) };
            (opts.mode_for(tag), rest, true)
        }
        None => (mode, Some(Cow::Borrowed(line)), false),
    };

    let Some(line) = line else {
        return Step {
            state: State::InBlockComment(mode),
            line: None,
            tag_stripped,
        };
    };

    if has_block_close(&line) {
        return Step {
            state: State::Code,
            line: Some(line),
            tag_stripped,
        };
    }

    Step {
        state: State::InBlockComment(mode),
        line: mode.emits(opts.output).then_some(line),
        tag_stripped,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    pub lines_emitted: usize,
    pub lines_suppressed: usize,
    pub tags_stripped: usize,
}

/// Filters a whole file buffer. State does not leak between calls.
pub fn filter_bytes(input: &[u8], opts: &FilterOptions) -> (Vec<u8>, FilterStats) {
    let mut out = Vec::with_capacity(input.len());
    let mut stats = FilterStats::default();
    let mut state = State::Code;

    for line in input.split_inclusive(|&b| b == b'\n') {
        let step = next_state(state, line, opts);
        state = step.state;
        stats.lines_read += 1;
        if step.tag_stripped {
            stats.tags_stripped += 1;
        }
        match step.line {
            Some(text) => {
                out.extend_from_slice(&text);
                stats.lines_emitted += 1;
            }
            None => stats.lines_suppressed += 1,
        }
    }

    (out, stats)
}

/// Convenience wrapper over [`filter_bytes`] for UTF-8 text.
pub fn filter_str(input: &str, opts: &FilterOptions) -> String {
    let (out, _) = filter_bytes(input.as_bytes(), opts);
    // Only ASCII markup is ever removed, so char boundaries are preserved.
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCENARIO: &str = "/*\n\\~japanese\nJP text\n\\~english\nEN text\n\\~\nboth\n*/\n";

    fn english() -> FilterOptions {
        FilterOptions::new(OutputMode::English)
    }

    fn japanese() -> FilterOptions {
        FilterOptions::new(OutputMode::Japanese)
    }

    fn legacy(output: OutputMode) -> FilterOptions {
        FilterOptions {
            output,
            legacy_english_tag: true,
        }
    }

    #[test]
    fn scenario_japanese_output() {
        assert_eq!(filter_str(SCENARIO, &japanese()), "/*\nJP text\nboth\n*/\n");
    }

    #[test]
    fn scenario_english_output() {
        assert_eq!(filter_str(SCENARIO, &english()), "/*\nEN text\nboth\n*/\n");
    }

    #[test]
    fn legacy_english_tag_selects_japanese() {
        // Both escaped tags land in the japanese section.
        assert_eq!(
            filter_str(SCENARIO, &legacy(OutputMode::English)),
            "/*\nboth\n*/\n"
        );
        assert_eq!(
            filter_str(SCENARIO, &legacy(OutputMode::Japanese)),
            "/*\nJP text\nEN text\nboth\n*/\n"
        );
    }

    #[test]
    fn doxygen_header_block() {
        let input = "/*!\n  \\~japanese\n  \\brief nihongo\n  \\~english\n  \\brief English\n  \\~\n  \\author someone\n*/\n#include <stdio.h>\n";
        assert_eq!(
            filter_str(input, &english()),
            "/*!\n  \\brief English\n  \\author someone\n*/\n#include <stdio.h>\n"
        );
        assert_eq!(
            filter_str(input, &japanese()),
            "/*!\n  \\brief nihongo\n  \\author someone\n*/\n#include <stdio.h>\n"
        );
    }

    #[test]
    fn tag_with_trailing_text_keeps_remainder() {
        let input = "/*\n  \\~english Obtains data\n  \\~japanese deta\n*/\n";
        assert_eq!(filter_str(input, &english()), "/*\n   Obtains data\n*/\n");
        assert_eq!(filter_str(input, &japanese()), "/*\n   deta\n*/\n");
    }

    #[test]
    fn closer_is_emitted_in_any_mode() {
        let input = "/*\n\\~english\nEN\nEN end */\nint x;\n";
        assert_eq!(filter_str(input, &japanese()), "/*\nEN end */\nint x;\n");
    }

    #[test]
    fn closer_on_tag_line_is_emitted() {
        let input = "/*\n\\~japanese\nJP\n\\~ */\n";
        assert_eq!(filter_str(input, &english()), "/*\n */\n");
    }

    #[test]
    fn mode_resets_at_each_opener() {
        let input = "/*\n\\~japanese\nJP\n*/\n/*\nshared\n*/\n";
        assert_eq!(filter_str(input, &english()), "/*\n*/\n/*\nshared\n*/\n");
    }

    #[test]
    fn opener_line_is_never_filtered() {
        let input = "/* \\~japanese start\nJP\n*/\n";
        let out = filter_str(input, &english());
        assert_eq!(out, "/* \\~japanese start\nJP\n*/\n");
    }

    #[test]
    fn single_line_block_comment_stays_in_code() {
        let input = "int a; /* \\~japanese nihongo */\n/* \\~english English */\nint b;\n";
        assert_eq!(
            filter_str(input, &english()),
            "int a; /* */\n/* \\~english English */\nint b;\n"
        );
        assert_eq!(
            filter_str(input, &japanese()),
            "int a; /* \\~japanese nihongo */\n/* */\nint b;\n"
        );
    }

    #[test]
    fn line_comment_directive_without_marker_passes_through() {
        let input = "    // \\~japanese mae\n    // \\~english Shows only the front step\n";
        assert_eq!(filter_str(input, &english()), input);
        assert_eq!(filter_str(input, &japanese()), input);
    }

    #[test]
    fn unterminated_block_swallows_rest_of_file() {
        let input = "/*\n\\~japanese\nint x;\nint y;\n";
        let (out, stats) = filter_bytes(input.as_bytes(), &english());
        assert_eq!(out, b"/*\n");
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.lines_suppressed, 3);
        assert_eq!(stats.tags_stripped, 1);
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let input = "/*\r\n\\~english\r\nEN\r\n\\~\r\n*/";
        assert_eq!(filter_str(input, &japanese()), "/*\r\n*/");
    }

    #[test]
    fn stats_count_every_line() {
        let (_, stats) = filter_bytes(SCENARIO.as_bytes(), &japanese());
        assert_eq!(
            stats,
            FilterStats {
                lines_read: 8,
                lines_emitted: 4,
                lines_suppressed: 4,
                tags_stripped: 3,
            }
        );
    }

    #[test]
    fn next_state_transitions() {
        let opts = english();
        let step = next_state(State::Code, b"/**\n", &opts);
        assert_eq!(step.state, State::InBlockComment(Mode::Both));

        let step = next_state(State::InBlockComment(Mode::Both), b"\\~english\n", &opts);
        assert_eq!(step.state, State::InBlockComment(Mode::English));
        assert_eq!(step.line, None);

        let step = next_state(State::InBlockComment(Mode::English), b" */\n", &opts);
        assert_eq!(step.state, State::Code);
        assert_eq!(step.line.as_deref(), Some(&b" */\n"[..]));
    }

    // Operators and tildes are fine as long as they never spell a token.
    fn plain_line() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ;(){}=+#\t/*~]{0,40}".prop_filter("contains markup", |l| {
            !["/*", "*/", "~japanese", "~english"]
                .iter()
                .any(|token| l.contains(token))
        })
    }

    #[test]
    fn operators_outside_comments_pass_through() {
        let input = "a = b / c * d;
x ~ y;
*p = ~mask / 2;
";
        assert_eq!(filter_str(input, &english()), input);
        assert_eq!(filter_str(input, &japanese()), input);
    }

    proptest! {
        #[test]
        fn plain_lines_pass_through(lines in prop::collection::vec(plain_line(), 0..20)) {
            let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
            prop_assert_eq!(&filter_str(&input, &english()), &input);
            prop_assert_eq!(&filter_str(&input, &japanese()), &input);
        }

        #[test]
        fn filtered_marker_free_output_is_stable(
            body in prop::collection::vec("[a-z ]{0,20}", 0..10),
            english_out in any::<bool>(),
        ) {
            let opts = if english_out { english() } else { japanese() };
            let mut input = String::from("/*\n");
            for l in &body {
                input.push_str(l);
                input.push('\n');
            }
            input.push_str("*/\ncode();\n");
            let once = filter_str(&input, &opts);
            prop_assert_eq!(&filter_str(&once, &opts), &once);
        }
    }
}
