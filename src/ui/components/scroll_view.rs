use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

/// A bordered, wrapped paragraph with a vertical offset that never scrolls
/// past the last line.
pub struct ScrollView<'a> {
    lines: Vec<Line<'static>>,
    block: Block<'a>,
    scroll: u16,
}

impl<'a> ScrollView<'a> {
    pub fn new(lines: Vec<Line<'static>>, block: Block<'a>, scroll: u16) -> Self {
        Self {
            lines,
            block,
            scroll,
        }
    }

    /// Largest useful offset when rendered into `area`.
    pub fn max_scroll(&self, area: Rect) -> u16 {
        let inner = self.block.inner(area);
        overflow(&wrapped(self.lines.clone()), inner)
    }
}

fn wrapped(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// Rows the paragraph needs beyond `inner`, counted with the same word
/// wrapper the renderer uses.
fn overflow(paragraph: &Paragraph, inner: Rect) -> u16 {
    let rows = paragraph.line_count(inner.width);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_sub(inner.height)
}

impl Widget for ScrollView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = wrapped(self.lines);
        let scroll = self.scroll.min(overflow(&paragraph, self.block.inner(area)));
        paragraph
            .block(self.block)
            .scroll((scroll, 0))
            .render(area, buf);
    }
}
