use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::content::Problem;
use crate::ui::components::formula_text::{formula_lines, with_prefix};
use crate::ui::theme::Theme;

pub struct AnalysisView<'a> {
    pub problem: &'a Problem,
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl AnalysisView<'_> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(Span::styled(
                "Where did your thinking stop?",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Pick the step that describes you best for \"{}\".", self.problem.title),
                Style::default().fg(colors.muted()),
            )),
            Line::from(""),
        ];

        if self.problem.branches.is_empty() {
            lines.push(Line::from(Span::styled(
                "No analysis is available for this problem.",
                Style::default().fg(colors.muted()),
            )));
            return lines;
        }

        for (i, branch) in self.problem.branches.iter().enumerate() {
            let at_cursor = i == self.cursor;
            let marker = if at_cursor { "▶ " } else { "  " };
            let label_style = if at_cursor {
                Style::default()
                    .fg(colors.selected_fg())
                    .bg(colors.selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(colors.accent())),
                Span::styled(
                    format!(" {} ", branch.title),
                    Style::default()
                        .fg(colors.header_fg())
                        .bg(colors.highlight())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(format!("{}. {}", i + 1, branch.label), label_style),
            ]));
            lines.extend(with_prefix(
                vec![Span::raw("    ")],
                formula_lines(&branch.diagnosis, Style::default().fg(colors.muted())),
            ));
            lines.push(Line::from(""));
        }

        lines
    }
}
