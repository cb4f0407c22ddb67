//! Source loader — one native extension source file per run.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_FIRST_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Raw text of a native extension source file.
#[derive(Debug, Clone)]
pub struct Source {
    text: String,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a source file as UTF-8.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Module description: the leading comment block, when the file opens with one.
    pub fn header_description(&self) -> String {
        if !self.text.starts_with('/') {
            return String::new();
        }
        RE_FIRST_BLOCK
            .find(&self.text)
            .map(|m| strip_comment(m.as_str()).trim().to_string())
            .unwrap_or_default()
    }

    /// Region searched for method comments: from the first `#include`
    /// up to the initializer routine.
    pub fn body(&self, init_start: usize) -> &str {
        let end = init_start.min(self.text.len());
        let start = self.text[..end].find("#include").unwrap_or(0);
        &self.text[start..end]
    }
}

/// Strip `/*` `*/` delimiters and the `*` gutter from a block comment.
///
/// Indentation after the gutter is kept; a block without a gutter is
/// unindented instead. Leading and trailing blank lines are dropped.
pub fn strip_comment(block: &str) -> String {
    let inner = block.trim();
    let inner = inner.strip_prefix("/*").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    let inner = inner.trim_start_matches('*');

    let has_gutter = inner
        .lines()
        .skip(1)
        .any(|line| line.trim_start().starts_with('*'));

    let mut lines: Vec<String> = inner
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let t = line.trim_start();
            let text = match t.strip_prefix('*') {
                Some(rest) if has_gutter => rest.strip_prefix(' ').unwrap_or(rest),
                // text on the opening line has no gutter to align with
                _ if i == 0 => t,
                _ => line,
            };
            text.trim_end().to_string()
        })
        .collect();

    if !has_gutter {
        let indent = lines
            .iter()
            .skip(1)
            .filter(|l| !l.is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);
        for line in lines.iter_mut().skip(1) {
            *line = line.get(indent..).unwrap_or("").to_string();
        }
    }

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_gutter_keeps_indent() {
        let block = "/*\n * Draws a circle\n *\n *   circle 1, 2, 3\n */";
        assert_eq!(strip_comment(block), "Draws a circle\n\n  circle 1, 2, 3");
    }

    #[test]
    fn strip_unindents_block_without_gutter() {
        let block = "/*\n  Draws a circle\n\n  x - center\n    more\n*/";
        assert_eq!(strip_comment(block), "Draws a circle\n\nx - center\n  more");
    }

    #[test]
    fn strip_without_gutter() {
        assert_eq!(strip_comment("/* plain words */"), "plain words");
    }

    #[test]
    fn header_description_from_leading_block() {
        let src = Source::new("/*\n * Graphics module\n */\n#include \"ruby.h\"\n");
        assert_eq!(src.header_description(), "Graphics module");
    }

    #[test]
    fn header_description_requires_leading_comment() {
        let src = Source::new("#include \"ruby.h\"\n/* later */\n");
        assert_eq!(src.header_description(), "");
    }

    #[test]
    fn body_starts_at_first_include() {
        let text = "/* license */\n#include \"ruby.h\"\nVALUE f() {}\nvoid Init_x() {}\n";
        let src = Source::new(text);
        let init = text.find("void Init").unwrap();
        assert_eq!(src.body(init), "#include \"ruby.h\"\nVALUE f() {}\n");
    }
}
