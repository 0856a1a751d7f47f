use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_CLASS: &str = "t-code-heroicon";

const TAG_CLOSE: &str = "']";

// Tags glued to a code/php opening or closing delimiter are literal text.
const CODE_OPENERS: [&str; 2] = ["[code]", "[php]"];
const CODE_CLOSERS: [&str; 2] = ["[/code]", "[/php]"];

static TAG_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[heroicon='").expect("valid heroicon tag regex"));

static ICON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid icon name regex"));

/// Rewrites `[heroicon='name']` tags into inline SVG markup.
#[derive(Debug, Clone)]
pub struct IconExpander {
    icon_dir: PathBuf,
    class: String,
}

impl IconExpander {
    pub fn new(icon_dir: impl Into<PathBuf>) -> Self {
        Self::with_class(icon_dir, DEFAULT_CLASS)
    }

    pub fn with_class(icon_dir: impl Into<PathBuf>, class: impl Into<String>) -> Self {
        Self {
            icon_dir: icon_dir.into(),
            class: class.into(),
        }
    }

    pub fn icon_dir(&self) -> &Path {
        &self.icon_dir
    }

    /// Expand every tag in `message`. Unknown icons disappear from the output.
    pub fn expand(&self, message: &str) -> String {
        let mut out = String::with_capacity(message.len());
        let mut last = 0;
        let mut pos = 0;

        while let Some(open) = TAG_OPEN_RE.find_at(message, pos) {
            pos = open.end();
            if ends_with_any(&message[..open.start()], &CODE_OPENERS) {
                continue;
            }

            // No later tag on this line can close either.
            let Some(close) = find_tag_close(message, open.end()) else {
                pos = line_end(message, open.end());
                continue;
            };

            out.push_str(&message[last..open.start()]);
            if let Some(markup) = self.render_icon(&message[open.end()..close]) {
                out.push_str(&markup);
            }
            last = close + TAG_CLOSE.len();
            pos = last;
        }

        out.push_str(&message[last..]);
        out
    }

    /// Markup for a single icon, or `None` when it cannot be served.
    pub fn render_icon(&self, name: &str) -> Option<String> {
        let path = self.icon_path(name)?;
        let svg = fs::read_to_string(path).ok()?;
        Some(format!(
            r#"<span class="{}">{}</span>"#,
            self.class,
            strip_layout_whitespace(&svg)
        ))
    }

    /// Asset path for `name`, refusing anything outside `[A-Za-z0-9_-]`.
    pub fn icon_path(&self, name: &str) -> Option<PathBuf> {
        if !is_safe_icon_name(name) {
            tracing::debug!("rejected icon name {name:?}");
            return None;
        }

        let path = self.icon_dir.join(format!("{name}.svg"));
        path.is_file().then_some(path)
    }
}

/// Offset of the first `']` on the tag's line that is not glued to a code closer.
fn find_tag_close(message: &str, name_start: usize) -> Option<usize> {
    let line = &message[name_start..line_end(message, name_start)];

    line.match_indices(TAG_CLOSE)
        .map(|(offset, _)| name_start + offset)
        .find(|&close| !starts_with_any(&message[close + TAG_CLOSE.len()..], &CODE_CLOSERS))
}

fn line_end(message: &str, from: usize) -> usize {
    message[from..].find('\n').map_or(message.len(), |offset| from + offset)
}

fn ends_with_any(text: &str, tags: &[&str]) -> bool {
    let bytes = text.as_bytes();
    tags.iter().any(|tag| {
        bytes.len() >= tag.len()
            && bytes[bytes.len() - tag.len()..].eq_ignore_ascii_case(tag.as_bytes())
    })
}

fn starts_with_any(text: &str, tags: &[&str]) -> bool {
    let bytes = text.as_bytes();
    tags.iter().any(|tag| {
        bytes.len() >= tag.len() && bytes[..tag.len()].eq_ignore_ascii_case(tag.as_bytes())
    })
}

pub fn is_safe_icon_name(name: &str) -> bool {
    ICON_NAME_RE.is_match(name)
}

/// Collapse an SVG document to one line by dropping CR, LF and tab characters.
pub fn strip_layout_whitespace(svg: &str) -> String {
    svg.chars()
        .filter(|ch| !matches!(ch, '\r' | '\n' | '\t'))
        .collect()
}
