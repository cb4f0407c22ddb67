//! Comment matcher — finds the block comment directly above a method's C
//! definition and splits it into description, signatures, examples and
//! return value.
//!
//! Block layout (after the `*` gutter is stripped):
//!
//! ```text
//! Draws a circle.                      <- description (first paragraph)
//!
//! x y radius                           <- optional bare argument list
//! x - horizontal center                <- argument descriptions
//! y - vertical center
//!
//! Examples
//!
//!   circle 10, 10, 5                   <- indented example
//!
//! Returns nothing                      <- return value
//! ```
//!
//! Fenced code blocks anywhere in the comment are examples as well.

use crate::model::{Arg, Signature};
use crate::source::strip_comment;
use regex::Regex;
use std::sync::LazyLock;

// `name - description`, description optional
static RE_ARG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_?!*&=.]*)\s+-(?:\s+(.*))?$").unwrap());

// `x y radius`
static RE_ARG_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][A-Za-z0-9_]*(?:[ \t]+[a-z_][A-Za-z0-9_]*)*$").unwrap());

static RE_EXAMPLES_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Examples:?$").unwrap());

/// Parsed contents of one structured comment block.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommentDoc {
    pub description: String,
    pub signatures: Vec<Signature>,
    pub examples: Vec<String>,
    pub returns: Option<String>,
}

impl CommentDoc {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.signatures.is_empty()
            && self.examples.is_empty()
            && self.returns.is_none()
    }
}

/// Find the comment block immediately preceding `VALUE <symbol>(` in `body`.
///
/// Only whitespace and single-line comments may sit between the block and
/// the definition. Returns the block text with delimiters stripped.
pub fn find_block(body: &str, symbol: &str) -> Option<String> {
    let pattern = format!(
        r"(?m)^[ \t]*(?:static\s+)?VALUE\s+{}\s*\(",
        regex::escape(symbol)
    );
    let re = Regex::new(&pattern).ok()?;

    // Prototypes match too; the first definition with an adjacent block wins.
    let found = re
        .find_iter(body)
        .find_map(|def| block_before(&body[..def.start()]));
    found
}

fn block_before(text: &str) -> Option<String> {
    let mut before = text;
    loop {
        let trimmed = before.trim_end();
        let head = trimmed.strip_suffix("*/")?;
        let open = head.rfind("/*")?;
        let block = &trimmed[open..];
        if block.contains('\n') {
            return Some(strip_comment(block));
        }
        before = &trimmed[..open];
    }
}

enum Chunk<'a> {
    Fenced(String),
    Paragraph(Vec<&'a str>),
}

/// Split stripped comment text into paragraphs and fenced blocks.
fn chunks(text: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut para: Vec<&str> = Vec::new();
    let mut fence: Option<Vec<&str>> = None;

    for line in text.lines() {
        let is_fence = line.trim_start().starts_with("```");
        match fence.as_mut() {
            Some(body) if is_fence => {
                out.push(Chunk::Fenced(unindent(&body.join("\n"))));
                fence = None;
            }
            Some(body) => body.push(line),
            None if is_fence => {
                if !para.is_empty() {
                    out.push(Chunk::Paragraph(std::mem::take(&mut para)));
                }
                fence = Some(Vec::new());
            }
            None if line.trim().is_empty() => {
                if !para.is_empty() {
                    out.push(Chunk::Paragraph(std::mem::take(&mut para)));
                }
            }
            None => para.push(line),
        }
    }
    // Unterminated fence: keep what was captured
    if let Some(body) = fence {
        out.push(Chunk::Fenced(unindent(&body.join("\n"))));
    }
    if !para.is_empty() {
        out.push(Chunk::Paragraph(para));
    }
    out
}

/// Parse the text of a structured comment block.
pub fn parse_block(text: &str) -> CommentDoc {
    let mut description: Vec<String> = Vec::new();
    let mut signatures = Vec::new();
    let mut examples = Vec::new();
    let mut returns: Vec<String> = Vec::new();

    let mut first = true;
    let mut in_examples = false;

    for chunk in chunks(text) {
        let lines = match chunk {
            Chunk::Fenced(example) => {
                examples.push(example);
                continue;
            }
            Chunk::Paragraph(lines) => lines,
        };

        if lines.len() == 1 && RE_EXAMPLES_HEADING.is_match(lines[0].trim()) {
            in_examples = true;
            first = false;
            continue;
        }

        if in_examples {
            if lines.iter().all(|l| is_indented(l)) {
                examples.push(unindent(&lines.join("\n")));
                continue;
            }
            in_examples = false;
        }

        if lines[0].trim_start().starts_with("Returns") {
            returns.extend(lines.iter().map(|l| l.trim().to_string()));
            first = false;
            continue;
        }

        if !first {
            if let Some(sig) = parse_signature(&lines) {
                signatures.push(sig);
                continue;
            }
        }

        first = false;
        description.push(lines.join("\n"));
    }

    let returns = returns.join(" ");
    let returns = returns
        .strip_prefix("Returns")
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    CommentDoc {
        description: description.join("\n\n"),
        signatures,
        examples,
        returns,
    }
}

/// Parse an argument paragraph; `None` if any line is not part of one.
fn parse_signature(lines: &[&str]) -> Option<Signature> {
    let mut args: Vec<Arg> = Vec::new();
    let mut rest = lines;

    // Bare argument list fixes the order
    let listed = RE_ARG_LIST.is_match(lines[0].trim_end());
    if listed {
        args = lines[0]
            .split_whitespace()
            .map(|name| Arg {
                name: name.to_string(),
                description: None,
            })
            .collect();
        rest = &lines[1..];
    }

    let mut last: Option<usize> = None;
    for line in rest {
        if let Some(caps) = RE_ARG_LINE.captures(line.trim_end()) {
            let name = &caps[1];
            let description = caps
                .get(2)
                .map(|m| m.as_str().trim().to_string())
                .filter(|d| !d.is_empty());
            let idx = match args.iter().position(|a| listed && a.name == name) {
                Some(idx) => {
                    args[idx].description = description;
                    idx
                }
                None => {
                    args.push(Arg {
                        name: name.to_string(),
                        description,
                    });
                    args.len() - 1
                }
            };
            last = Some(idx);
        } else if is_indented(line) {
            let arg = &mut args[last?];
            let more = line.trim();
            match arg.description.as_mut() {
                Some(desc) => {
                    desc.push(' ');
                    desc.push_str(more);
                }
                None => arg.description = Some(more.to_string()),
            }
        } else {
            return None;
        }
    }

    // A bare list needs at least one `name - text` line, or it is prose.
    if args.is_empty() || (listed && last.is_none()) {
        None
    } else {
        Some(Signature { args })
    }
}

fn is_indented(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

/// Remove common leading indentation from a multi-line string.
fn unindent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let start = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(start) => start,
        None => return String::new(),
    };
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(start);

    let min_indent = lines[start..=end]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines[start..=end]
        .iter()
        .map(|l| l.get(min_indent..).unwrap_or("").trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
