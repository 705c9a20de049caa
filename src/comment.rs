use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// Language whose comments survive the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    English,
    Japanese,
}

impl OutputMode {
    pub fn flag(self) -> &'static str {
        match self {
            OutputMode::English => "-e",
            OutputMode::Japanese => "-j",
        }
    }
}

/// Language scope of the block comment currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Both,
    Japanese,
    English,
}

impl Mode {
    pub fn emits(self, output: OutputMode) -> bool {
        match self {
            Mode::Both => true,
            Mode::Japanese => output == OutputMode::Japanese,
            Mode::English => output == OutputMode::English,
        }
    }
}

/// Escaped transition tag found inside a block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Japanese,
    English,
    Reset,
}

/// A regex hit split into the text around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub pre: &'a [u8],
    pub marker: &'a [u8],
    pub post: &'a [u8],
}

impl TagMatch<'_> {
    /// Rebuilds the line with the matched span replaced by `marker`.
    pub fn splice(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pre.len() + self.marker.len() + self.post.len());
        out.extend_from_slice(self.pre);
        out.extend_from_slice(self.marker);
        out.extend_from_slice(self.post);
        out
    }
}

static BLOCK_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\*").unwrap());
static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*/").unwrap());
static INLINE_TRIGGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"~japanese|~english").unwrap());

// `.` stops at '\n' and matches any other byte, so non-UTF-8 text is fine.
static INLINE_JAPANESE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)\\~japanese .+ ([*\\])").unwrap());
static INLINE_ENGLISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)\\~english .+ ([*\\])").unwrap());

static TAG_JAPANESE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\~japanese").unwrap());
static TAG_ENGLISH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\~english").unwrap());
static TAG_RESET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\~").unwrap());

pub fn has_block_open(line: &[u8]) -> bool {
    BLOCK_OPEN.is_match(line)
}

pub fn has_block_close(line: &[u8]) -> bool {
    BLOCK_CLOSE.is_match(line)
}

pub fn has_inline_trigger(line: &[u8]) -> bool {
    INLINE_TRIGGER.is_match(line)
}

/// Only whitespace (or NUL padding) left on the line.
pub fn is_blank(line: &[u8]) -> bool {
    line.iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c' | b'\0'))
}

fn capture<'a>(re: &Regex, line: &'a [u8]) -> Option<TagMatch<'a>> {
    let caps = re.captures(line)?;
    let whole = caps.get(0)?;
    let marker = caps.get(1).map_or(&[][..], |m| m.as_bytes());
    Some(TagMatch {
        pre: &line[..whole.start()],
        marker,
        post: &line[whole.end()..],
    })
}

/// First escaped tag on a line, checked in japanese, english, reset order.
pub fn find_block_tag(line: &[u8]) -> Option<(BlockTag, TagMatch<'_>)> {
    [
        (BlockTag::Japanese, &*TAG_JAPANESE),
        (BlockTag::English, &*TAG_ENGLISH),
        (BlockTag::Reset, &*TAG_RESET),
    ]
    .into_iter()
    .find_map(|(tag, re)| capture(re, line).map(|m| (tag, m)))
}

/// Drops the other language's fragment from a one-line comment.
///
/// The span from the foreign tag up to the last ` *` or ` \` on the line is
/// replaced by that trailing marker, so `/* \~japanese ... */` collapses to
/// `/* */` when English is selected. Lines that do not match come back
/// borrowed.
pub fn split_single_line(line: &[u8], output: OutputMode) -> Cow<'_, [u8]> {
    let mut current = Cow::Borrowed(line);

    if output == OutputMode::English {
        if let Some(m) = capture(&INLINE_JAPANESE, &current) {
            current = Cow::Owned(m.splice());
        }
    }
    if output == OutputMode::Japanese {
        if let Some(m) = capture(&INLINE_ENGLISH, &current) {
            current = Cow::Owned(m.splice());
        }
    }

    current
}
