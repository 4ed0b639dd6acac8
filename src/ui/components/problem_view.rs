use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::content::{Category, InputKind, Problem, Question};
use crate::session::{Session, UserInput};
use crate::ui::answer_editor::AnswerEditor;
use crate::ui::components::formula_text::{formula_lines, with_prefix};
use crate::ui::theme::{Theme, ThemeColors};

const INDENT: &str = "    ";

/// Builds the lines of the problem screen: chapter badge, statement,
/// questions with their inputs, and after reveal the model answers and
/// explanation.
pub struct ProblemView<'a> {
    pub session: &'a Session<'a>,
    pub theme: &'a Theme,
    pub focused_question: usize,
    pub option_cursor: usize,
    /// Editor open on a free-text question, if any.
    pub editor: Option<&'a AnswerEditor>,
}

impl<'a> ProblemView<'a> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let problem = self.session.current_problem();
        let mut lines = Vec::new();

        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    " CHAPTER {} / {} ",
                    self.session.index() + 1,
                    self.session.problem_count()
                ),
                Style::default()
                    .fg(colors.header_fg())
                    .bg(colors.header_bg())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                problem.title.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));

        if let Some(description) = &problem.description {
            lines.extend(formula_lines(description, Style::default().fg(colors.fg())));
            lines.push(Line::from(""));
        }

        for equation in &problem.equations {
            lines.extend(with_prefix(
                vec![Span::raw(INDENT)],
                formula_lines(equation, Style::default().fg(colors.info())),
            ));
        }
        if !problem.equations.is_empty() {
            lines.push(Line::from(""));
        }

        for (i, question) in problem.questions.iter().enumerate() {
            self.push_question(&mut lines, problem, question, i == self.focused_question);
            lines.push(Line::from(""));
        }

        if self.session.is_revealed() && !problem.explanation_points.is_empty() {
            lines.push(Line::from(Span::styled(
                "EXPLANATION",
                Style::default()
                    .fg(colors.marker())
                    .add_modifier(Modifier::BOLD),
            )));
            for point in &problem.explanation_points {
                lines.extend(with_prefix(
                    vec![Span::styled(" • ", Style::default().fg(colors.marker()))],
                    formula_lines(point, Style::default().fg(colors.fg())),
                ));
            }
        }

        lines
    }

    fn push_question(
        &self,
        lines: &mut Vec<Line<'static>>,
        problem: &Problem,
        question: &Question,
        focused: bool,
    ) {
        let colors = &self.theme.colors;
        let marker = if focused { "▶ " } else { "  " };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.accent())),
            Span::styled(
                format!(" {} ", question.category.badge()),
                Style::default()
                    .fg(colors.header_fg())
                    .bg(category_color(colors, question.category))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                question.label.clone(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.extend(with_prefix(
            vec![Span::raw(INDENT)],
            formula_lines(&question.text, Style::default().fg(colors.fg())),
        ));

        match question.input {
            InputKind::Text => lines.push(self.text_input_line(question, focused)),
            InputKind::SelectionSingle | InputKind::SelectionMulti => {
                self.push_options(lines, question, focused);
            }
        }

        if self.session.is_revealed() {
            if let Some(answer) = problem.answer(&question.id) {
                lines.extend(with_prefix(
                    vec![
                        Span::raw(INDENT),
                        Span::styled(
                            "Answer: ",
                            Style::default()
                                .fg(colors.answer())
                                .add_modifier(Modifier::BOLD),
                        ),
                    ],
                    formula_lines(answer, Style::default().fg(colors.answer())),
                ));
            }
        }
    }

    fn text_input_line(&self, question: &Question, focused: bool) -> Line<'static> {
        let colors = &self.theme.colors;
        let prompt = Span::styled(format!("{INDENT}> "), Style::default().fg(colors.accent()));

        if let Some(editor) = self.editor.filter(|e| e.question() == question.id) {
            let (before, cursor, after) = editor.split_at_cursor();
            let cursor_style = Style::default()
                .fg(colors.selected_fg())
                .bg(colors.selected_bg());
            return Line::from(vec![
                prompt,
                Span::styled(before, Style::default().fg(colors.fg())),
                Span::styled(cursor.unwrap_or(' ').to_string(), cursor_style),
                Span::styled(after, Style::default().fg(colors.fg())),
            ]);
        }

        let value = match self.session.input(&question.id) {
            Some(UserInput::Single(value)) if !value.is_empty() => Some(value.clone()),
            _ => None,
        };
        let body = match (value, self.session.is_revealed()) {
            (Some(value), _) => Span::styled(value, Style::default().fg(colors.fg())),
            (None, true) => Span::styled("(no answer)", Style::default().fg(colors.muted())),
            (None, false) if focused => Span::styled(
                "press Enter to write your answer",
                Style::default().fg(colors.muted()),
            ),
            (None, false) => Span::styled("…", Style::default().fg(colors.muted())),
        };
        Line::from(vec![prompt, body])
    }

    fn push_options(&self, lines: &mut Vec<Line<'static>>, question: &Question, focused: bool) {
        let colors = &self.theme.colors;
        let multi = question.input == InputKind::SelectionMulti;

        for (j, option) in question.options.iter().enumerate() {
            let selected = self.session.is_selected(&question.id, option);
            let mark = match (multi, selected) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let at_cursor = focused && j == self.option_cursor && !self.session.is_revealed();

            let mut style = Style::default().fg(if selected { colors.accent() } else { colors.fg() });
            if at_cursor {
                style = style.fg(colors.selected_fg()).bg(colors.selected_bg());
            }

            let prefix = vec![
                Span::raw(INDENT),
                Span::styled(format!("{mark} {}. ", j + 1), style),
            ];
            lines.extend(with_prefix(prefix, formula_lines(option, style)));
        }
    }
}

fn category_color(colors: &ThemeColors, category: Category) -> Color {
    match category {
        Category::Knowledge => colors.info(),
        Category::Principle => colors.accent(),
        Category::Judgment => colors.warning(),
        Category::Skill => colors.success(),
    }
}
