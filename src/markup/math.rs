use crate::markup::Segment;

pub const ARROW: &str = "\u{2192}";

const TEXT_COMMAND: &str = "\\text{";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Script {
    Sub,
    Sup,
}

impl Script {
    fn from_marker(ch: char) -> Option<Self> {
        match ch {
            '_' => Some(Script::Sub),
            '^' => Some(Script::Sup),
            _ => None,
        }
    }

    fn segment(self, body: String) -> Segment {
        match self {
            Script::Sub => Segment::Subscript(body),
            Script::Sup => Segment::Superscript(body),
        }
    }
}

/// Result of reading the body that follows a `_` or `^` marker.
#[derive(Debug, PartialEq, Eq)]
enum Body {
    /// Body text and the index just past it.
    Found(String, usize),
    /// Marker was the last character on its line.
    Missing,
    /// `{` opened but no `}` before the end of the line.
    Unclosed,
}

/// Render one math span (the text between a `$` pair) into `segments`.
pub fn render_math(latex: &str, segments: &mut Vec<Segment>) {
    let clean = substitute(latex);
    let chars: Vec<char> = clean.chars().collect();
    let mut buffer = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let Some(script) = Script::from_marker(ch) else {
            push_char(ch, &mut buffer, segments);
            i += 1;
            continue;
        };

        match read_body(&chars, i + 1) {
            Body::Found(body, next) => {
                flush(&mut buffer, segments);
                if !body.is_empty() {
                    segments.push(script.segment(body));
                }
                i = next;
            }
            Body::Missing => {
                buffer.push(ch);
                i += 1;
            }
            Body::Unclosed => {
                for &rest in &chars[i..] {
                    push_char(rest, &mut buffer, segments);
                }
                break;
            }
        }
    }

    flush(&mut buffer, segments);
}

/// Substitution pass applied before scanning. Each rule runs over the output
/// of the previous one, in this order, exactly once.
pub fn substitute(latex: &str) -> String {
    let unwrapped = unwrap_text_commands(latex);
    let arrows = unwrapped
        .replace("\\longrightarrow", ARROW)
        .replace("\\to", ARROW);
    collapse_escaped_spaces(&arrows)
}

/// `\text{X}` becomes `X` when X is non-empty and contains no `}`.
fn unwrap_text_commands(latex: &str) -> String {
    let mut out = String::with_capacity(latex.len());
    let mut rest = latex;

    while let Some(start) = rest.find(TEXT_COMMAND) {
        let body_start = start + TEXT_COMMAND.len();
        match rest[body_start..].find('}') {
            Some(len) if len > 0 => {
                out.push_str(&rest[..start]);
                out.push_str(&rest[body_start..body_start + len]);
                rest = &rest[body_start + len + 1..];
            }
            _ => {
                out.push_str(&rest[..body_start]);
                rest = &rest[body_start..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// A backslash followed by one or more spaces becomes a single space.
fn collapse_escaped_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&' ') {
            while chars.peek() == Some(&' ') {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

fn read_body(chars: &[char], start: usize) -> Body {
    match chars.get(start) {
        None | Some('\n') => Body::Missing,
        Some('{') => {
            let open = start + 1;
            let close = chars[open..]
                .iter()
                .position(|&c| c == '}' || c == '\n')
                .map(|offset| open + offset);
            match close {
                Some(end) if chars[end] == '}' => {
                    Body::Found(chars[open..end].iter().collect(), end + 1)
                }
                _ => Body::Unclosed,
            }
        }
        Some(&c) => Body::Found(c.to_string(), start + 1),
    }
}

fn push_char(ch: char, buffer: &mut String, segments: &mut Vec<Segment>) {
    if ch == '\n' {
        flush(buffer, segments);
        segments.push(Segment::Break);
    } else {
        buffer.push(ch);
    }
}

fn flush(buffer: &mut String, segments: &mut Vec<Segment>) {
    if !buffer.is_empty() {
        segments.push(Segment::Text(std::mem::take(buffer)));
    }
}
