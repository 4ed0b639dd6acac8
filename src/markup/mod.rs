//! Inline formula markup.
//!
//! Text is split into plain and `$...$` math spans. Plain spans only honor
//! `\n` line breaks; math spans get a small LaTeX-like treatment (`\text{}`,
//! arrows, escaped spaces, `_` subscripts and `^` superscripts). Rendering
//! never fails: anything malformed comes out as literal text.

pub mod math;

use serde::Serialize;

/// One display unit. A view renders segments left to right and starts a new
/// line at every `Break`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    Subscript(String),
    Superscript(String),
    Break,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Span<'a> {
    Plain(&'a str),
    Math(&'a str),
}

pub fn render(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for span in split_spans(text) {
        match span {
            Span::Plain(plain) => push_plain(plain, &mut segments),
            Span::Math(latex) => math::render_math(latex, &mut segments),
        }
    }
    segments
}

/// Split on `$...$` pairs with a non-empty body. A `$` without a partner is
/// literal, and in `$$` the first `$` is literal while the second may still
/// open a span.
fn split_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while let Some(open) = text[pos..].find('$').map(|i| pos + i) {
        let body_start = open + 1;
        match text[body_start..].find('$').map(|i| body_start + i) {
            Some(close) if close > body_start => {
                if open > plain_start {
                    spans.push(Span::Plain(&text[plain_start..open]));
                }
                spans.push(Span::Math(&text[body_start..close]));
                pos = close + 1;
                plain_start = pos;
            }
            Some(_) => pos = body_start,
            None => break,
        }
    }

    if plain_start < text.len() {
        spans.push(Span::Plain(&text[plain_start..]));
    }
    spans
}

fn push_plain(plain: &str, segments: &mut Vec<Segment>) {
    for (i, line) in plain.split('\n').enumerate() {
        if i > 0 {
            segments.push(Segment::Break);
        }
        if !line.is_empty() {
            segments.push(Segment::Text(line.to_string()));
        }
    }
}

/// Concatenated text of every non-break segment, mostly useful for width
/// estimates and tests.
pub fn plain_text(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text(v) | Segment::Subscript(v) | Segment::Superscript(v) => Some(v.as_str()),
            Segment::Break => None,
        })
        .collect()
}
