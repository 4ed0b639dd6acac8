use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::content::{Branch, RemediationKind};
use crate::ui::components::formula_text::{formula_lines, with_prefix};
use crate::ui::theme::{Theme, ThemeColors};

/// Remediation screen for the branch the learner picked.
pub struct AdaptiveView<'a> {
    pub branch: &'a Branch,
    pub theme: &'a Theme,
}

impl AdaptiveView<'_> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let remediation = &self.branch.remediation;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    " Bottleneck ",
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(colors.highlight())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    self.branch.label.clone(),
                    Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        lines.extend(with_prefix(
            vec![Span::raw("  ")],
            formula_lines(&self.branch.diagnosis, Style::default().fg(colors.fg())),
        ));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            format!(" {} ", remediation.kind.badge()),
            Style::default()
                .fg(colors.header_fg())
                .bg(badge_color(colors, remediation.kind))
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(with_prefix(
            vec![Span::raw("  ")],
            formula_lines(&remediation.content, Style::default().fg(colors.fg())),
        ));

        if !remediation.points.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "CHECK POINT",
                Style::default()
                    .fg(colors.marker())
                    .add_modifier(Modifier::BOLD),
            )));
            for point in &remediation.points {
                lines.extend(with_prefix(
                    vec![Span::styled(" ✓ ", Style::default().fg(colors.success()))],
                    formula_lines(point, Style::default().fg(colors.fg())),
                ));
            }
        }

        lines
    }
}

fn badge_color(colors: &ThemeColors, kind: RemediationKind) -> Color {
    match kind {
        RemediationKind::Knowledge => colors.success(),
        RemediationKind::Exercise => colors.warning(),
    }
}
