//! # Comment Extraction
//!
//! Collects the comment block attached in front of an item or field.

use ra_ap_syntax::{SyntaxKind, SyntaxNode};

/// Returns the text of the comments attached to `node` before its name.
///
/// Line (`//`, `///`) and block (`/* */`, `/** */`) comments are accepted; inner
/// doc comments (`//!`, `/*!`) are ignored. Markers and one leading space per
/// line are stripped. A blank block counts as no comment.
pub(crate) fn leading_comment(node: &SyntaxNode) -> Option<String> {
    let mut lines = Vec::new();

    for child in node.children_with_tokens() {
        match child.kind() {
            SyntaxKind::NAME => break,
            SyntaxKind::COMMENT => lines.extend(comment_lines(&child.to_string())),
            _ => {}
        }
    }

    let text = lines.join("\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Strips comment markers from one comment token.
fn comment_lines(raw: &str) -> Vec<String> {
    if raw.starts_with("//!") || raw.starts_with("/*!") {
        return Vec::new();
    }

    if let Some(line) = raw.strip_prefix("//") {
        let line = line.trim_start_matches('/');
        return vec![strip_space(line).to_string()];
    }

    let Some(body) = raw.strip_prefix("/*").and_then(|b| b.strip_suffix("*/")) else {
        return vec![raw.to_string()];
    };
    let body = body.strip_prefix('*').unwrap_or(body);

    body.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix('*') {
                Some(rest) => strip_space(rest),
                None => strip_space(line),
            }
            .trim_end()
            .to_string()
        })
        .collect()
}

fn strip_space(line: &str) -> &str {
    line.strip_prefix(' ').unwrap_or(line)
}
