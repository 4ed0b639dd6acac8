use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{self, Segment};

/// Render marked-up text as terminal lines. Scripts use Unicode sub/superscript
/// glyphs when every character has one; otherwise they fall back to a styled
/// span of the raw body.
pub fn formula_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    segment_lines(&markup::render(text), style)
}

pub fn segment_lines(segments: &[Segment], style: Style) -> Vec<Line<'static>> {
    let mut lines: Vec<Vec<Span<'static>>> = vec![Vec::new()];

    for segment in segments {
        let span = match segment {
            Segment::Break => {
                lines.push(Vec::new());
                continue;
            }
            Segment::Text(value) => Span::styled(value.clone(), style),
            Segment::Subscript(value) => match to_subscript(value) {
                Some(glyphs) => Span::styled(glyphs, style),
                None => Span::styled(value.clone(), style.add_modifier(Modifier::DIM)),
            },
            Segment::Superscript(value) => match to_superscript(value) {
                Some(glyphs) => Span::styled(glyphs, style),
                None => Span::styled(value.clone(), style.add_modifier(Modifier::ITALIC)),
            },
        };
        if let Some(line) = lines.last_mut() {
            line.push(span);
        }
    }

    lines.into_iter().map(Line::from).collect()
}

/// Prefix the first line with `prefix` and indent the rest to match, so
/// bullets and labels hang correctly over wrapped formula text.
pub fn with_prefix(prefix: Vec<Span<'static>>, lines: Vec<Line<'static>>) -> Vec<Line<'static>> {
    let width: usize = prefix.iter().map(|s| s.width()).sum();
    let indent = " ".repeat(width);
    let mut prefix = Some(prefix);

    lines
        .into_iter()
        .map(|line| {
            let mut spans = match prefix.take() {
                Some(first) => first,
                None => vec![Span::raw(indent.clone())],
            };
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

pub fn to_subscript(text: &str) -> Option<String> {
    text.chars().map(subscript_char).collect()
}

pub fn to_superscript(text: &str) -> Option<String> {
    text.chars().map(superscript_char).collect()
}

fn subscript_char(ch: char) -> Option<char> {
    let mapped = match ch {
        '0'..='9' => char::from_u32('\u{2080}' as u32 + (ch as u32 - '0' as u32))?,
        '+' => '\u{208a}',
        '-' | '\u{2212}' => '\u{208b}',
        '=' => '\u{208c}',
        '(' => '\u{208d}',
        ')' => '\u{208e}',
        'a' => '\u{2090}',
        'e' => '\u{2091}',
        'o' => '\u{2092}',
        'x' => '\u{2093}',
        'h' => '\u{2095}',
        'k' => '\u{2096}',
        'l' => '\u{2097}',
        'm' => '\u{2098}',
        'n' => '\u{2099}',
        'p' => '\u{209a}',
        's' => '\u{209b}',
        't' => '\u{209c}',
        'i' => '\u{1d62}',
        'r' => '\u{1d63}',
        'u' => '\u{1d64}',
        'v' => '\u{1d65}',
        _ => return None,
    };
    Some(mapped)
}

fn superscript_char(ch: char) -> Option<char> {
    let mapped = match ch {
        '0' => '\u{2070}',
        '1' => '\u{00b9}',
        '2' => '\u{00b2}',
        '3' => '\u{00b3}',
        '4'..='9' => char::from_u32('\u{2074}' as u32 + (ch as u32 - '4' as u32))?,
        '+' => '\u{207a}',
        '-' | '\u{2212}' => '\u{207b}',
        '=' => '\u{207c}',
        '(' => '\u{207d}',
        ')' => '\u{207e}',
        'i' => '\u{2071}',
        'n' => '\u{207f}',
        _ => return None,
    };
    Some(mapped)
}
