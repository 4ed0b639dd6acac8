use std::cell::Cell;

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::config::Config;
use crate::content::{Catalog, InputKind, Question};
use crate::session::{Action, Session, UserInput, View};
use crate::ui::components::home::Menu;
use crate::ui::answer_editor::{AnswerEditor, EditOutcome};
use crate::ui::theme::Theme;

pub const SETTINGS_FIELDS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    /// Whatever the session view is.
    Session,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub session: Session<'static>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    pub settings_selected: usize,
    pub focused_question: usize,
    pub option_cursor: usize,
    pub branch_cursor: usize,
    pub scroll: u16,
    /// Largest scroll offset for the last frame drawn, written by the renderer.
    pub max_scroll: Cell<u16>,
    /// Open while a free-text answer is being typed.
    pub editor: Option<AnswerEditor>,
}

impl App {
    /// `chapter` is zero-based; when given, the app opens straight on that problem.
    pub fn new(
        catalog: &'static Catalog,
        config: Config,
        theme: &'static Theme,
        chapter: Option<usize>,
    ) -> Self {
        let mut session = Session::with_index(catalog, chapter.unwrap_or(0));
        if chapter.is_some() {
            session.apply(Action::Start);
        }

        Self {
            screen: AppScreen::Session,
            session,
            menu: Menu::new(theme, catalog.len()),
            theme,
            config,
            should_quit: false,
            settings_selected: 0,
            focused_question: 0,
            option_cursor: 0,
            branch_cursor: 0,
            scroll: 0,
            max_scroll: Cell::new(0),
            editor: None,
        }
    }

    /// Forward an action to the session and reset UI state that belonged to
    /// the previous view or problem.
    pub fn apply(&mut self, action: Action) -> bool {
        let index = self.session.index();
        let view = self.session.view().name();

        if !self.session.apply(action) {
            return false;
        }

        if self.session.index() != index {
            self.focused_question = 0;
            self.option_cursor = 0;
            self.scroll = 0;
            self.editor = None;
        }
        if self.session.view().name() != view {
            self.scroll = 0;
            self.editor = None;
            if matches!(self.session.view(), View::Analysis) && view != "adaptive" {
                self.branch_cursor = 0;
            }
        }
        true
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.screen = AppScreen::Settings;
    }

    pub fn close_settings(&mut self) {
        if let Err(e) = self.config.save() {
            warn!("saving config failed: {e:#}");
        }
        self.screen = AppScreen::Session;
    }

    fn focused(&self) -> Option<&'static Question> {
        self.session
            .current_problem()
            .questions
            .get(self.focused_question)
    }

    /// Move the input cursor down one row. Choice questions contribute one
    /// row per option, text questions a single row.
    pub fn cursor_down(&mut self) {
        let questions = &self.session.current_problem().questions;
        let Some(question) = questions.get(self.focused_question) else {
            return;
        };
        if question.input.is_choice() && self.option_cursor + 1 < question.options.len() {
            self.option_cursor += 1;
        } else if self.focused_question + 1 < questions.len() {
            self.focused_question += 1;
            self.option_cursor = 0;
        }
    }

    pub fn cursor_up(&mut self) {
        if self.option_cursor > 0 {
            self.option_cursor -= 1;
        } else if self.focused_question > 0 {
            self.focused_question -= 1;
            self.option_cursor = self
                .focused()
                .map(|q| q.options.len().saturating_sub(1))
                .unwrap_or(0);
        }
    }

    /// Enter on the focused question: open the editor for text, pick the
    /// option under the cursor for choices.
    pub fn activate(&mut self) {
        let Some(question) = self.focused() else {
            return;
        };
        match question.input {
            InputKind::Text => self.open_editor(),
            InputKind::SelectionSingle | InputKind::SelectionMulti => {
                self.choose_option(self.option_cursor);
            }
        }
    }

    /// Choose the option at `index` of the focused question.
    pub fn choose_option(&mut self, index: usize) -> bool {
        let Some(question) = self.focused() else {
            return false;
        };
        let Some(option) = question.options.get(index) else {
            return false;
        };
        let chosen = self.apply(Action::Choose {
            question: question.id.clone(),
            option: option.clone(),
        });
        if chosen {
            self.option_cursor = index;
        }
        chosen
    }

    pub fn open_editor(&mut self) {
        if self.session.is_revealed() {
            return;
        }
        let Some(question) = self.focused() else {
            return;
        };
        if question.input != InputKind::Text {
            return;
        }
        let current = match self.session.input(&question.id) {
            Some(UserInput::Single(value)) => value.as_str(),
            _ => "",
        };
        self.editor = Some(AnswerEditor::new(&question.id, current));
    }

    pub fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.handle(key) {
            EditOutcome::Editing => {}
            EditOutcome::Discard => self.editor = None,
            EditOutcome::Commit => {
                if let Some(editor) = self.editor.take() {
                    self.apply(Action::EditText {
                        question: editor.question().to_string(),
                        value: editor.text(),
                    });
                }
            }
        }
    }

    pub fn branch_next(&mut self) {
        let count = self.session.current_problem().branches.len();
        if self.branch_cursor + 1 < count {
            self.branch_cursor += 1;
        }
    }

    pub fn branch_prev(&mut self) {
        self.branch_cursor = self.branch_cursor.saturating_sub(1);
    }

    pub fn select_branch(&mut self, index: usize) -> bool {
        let Some(branch) = self.session.current_problem().branches.get(index) else {
            return false;
        };
        self.branch_cursor = index;
        self.apply(Action::SelectBranch(branch.id.clone()))
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self
            .scroll
            .saturating_add(self.config.scroll_step)
            .min(self.max_scroll.get());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.config.scroll_step);
    }

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let next = (idx + 1) % themes.len();
                    self.config.theme = themes[next].clone();
                } else if let Some(first) = themes.first() {
                    self.config.theme = first.clone();
                }
                self.reload_theme();
            }
            1 => {
                self.config.scroll_step = (self.config.scroll_step + 1).min(20);
            }
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                let themes = Theme::available_themes();
                if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
                    let prev = if idx == 0 { themes.len() - 1 } else { idx - 1 };
                    self.config.theme = themes[prev].clone();
                } else if let Some(last) = themes.last() {
                    self.config.theme = last.clone();
                }
                self.reload_theme();
            }
            1 => {
                self.config.scroll_step = self.config.scroll_step.saturating_sub(1).max(1);
            }
            _ => {}
        }
    }

    fn reload_theme(&mut self) {
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            debug!(theme = %self.config.theme, "theme switched");
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    const CATALOG: &str = r#"
[[problems]]
id = "p1"
title = "First"

[[problems.questions]]
id = "name"
label = "(1)"
category = "knowledge"
text = "Name it."
input = "text"

[[problems.questions]]
id = "pick"
label = "(2)"
category = "judgment"
text = "Pick one."
input = "selection-single"
options = ["a", "b", "c"]

[[problems.questions]]
id = "many"
label = "(3)"
category = "skill"
text = "Pick several."
input = "selection-multi"
options = ["x", "y"]

[[problems.branches]]
id = "b1"
title = "A"
label = "First gap"
diagnosis = "d1"

[problems.branches.remediation]
kind = "knowledge"
content = "c1"

[[problems.branches]]
id = "b2"
title = "B"
label = "Second gap"
diagnosis = "d2"

[problems.branches.remediation]
kind = "exercise"
content = "c2"

[[problems]]
id = "p2"
title = "Second"

[[problems.questions]]
id = "only"
label = "(1)"
category = "principle"
text = "Why?"
input = "text"
"#;

    fn app(chapter: Option<usize>) -> App {
        let catalog: &'static Catalog = Box::leak(Box::new(Catalog::from_toml(CATALOG).unwrap()));
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        App::new(catalog, Config::default(), theme, chapter)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_chapter_opens_problem_directly() {
        let opened = app(Some(1));
        assert_eq!(opened.session.view().name(), "problem");
        assert_eq!(opened.session.index(), 1);

        let home = app(None);
        assert_eq!(home.session.view().name(), "home");
    }

    #[test]
    fn test_chapter_past_end_is_clamped() {
        let clamped = app(Some(40));
        assert_eq!(clamped.session.index(), 1);
    }

    #[test]
    fn test_cursor_walks_options_then_questions() {
        let mut app = app(Some(0));
        app.cursor_down();
        assert_eq!((app.focused_question, app.option_cursor), (1, 0));
        app.cursor_down();
        app.cursor_down();
        assert_eq!((app.focused_question, app.option_cursor), (1, 2));
        app.cursor_down();
        assert_eq!((app.focused_question, app.option_cursor), (2, 0));
        app.cursor_down();
        app.cursor_down();
        assert_eq!((app.focused_question, app.option_cursor), (2, 1));

        app.cursor_up();
        app.cursor_up();
        assert_eq!((app.focused_question, app.option_cursor), (1, 2));
        app.cursor_up();
        app.cursor_up();
        app.cursor_up();
        app.cursor_up();
        assert_eq!((app.focused_question, app.option_cursor), (0, 0));
    }

    #[test]
    fn test_editor_submit_records_answer() {
        let mut app = app(Some(0));
        app.activate();
        assert!(app.editor.is_some());
        for ch in "NaCl".chars() {
            app.handle_editor_key(key(KeyCode::Char(ch)));
        }
        app.handle_editor_key(key(KeyCode::Enter));
        assert!(app.editor.is_none());
        assert_eq!(app.session.inputs().text("name"), Some("NaCl"));

        // Reopening starts from the stored answer; Esc discards edits.
        app.open_editor();
        app.handle_editor_key(key(KeyCode::Backspace));
        app.handle_editor_key(key(KeyCode::Esc));
        assert_eq!(app.session.inputs().text("name"), Some("NaCl"));
    }

    #[test]
    fn test_editor_not_opened_after_reveal() {
        let mut app = app(Some(0));
        app.apply(Action::Reveal);
        app.open_editor();
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_choose_option_by_number() {
        let mut app = app(Some(0));
        app.focused_question = 1;
        assert!(app.choose_option(2));
        assert!(app.session.is_selected("pick", "c"));
        assert_eq!(app.option_cursor, 2);
        assert!(!app.choose_option(9));
    }

    #[test]
    fn test_problem_change_resets_focus() {
        let mut app = app(Some(0));
        app.focused_question = 2;
        app.option_cursor = 1;
        app.scroll = 4;
        app.open_editor();
        assert!(app.apply(Action::Next));
        assert_eq!((app.focused_question, app.option_cursor, app.scroll), (0, 0, 0));
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_branch_selection_flow() {
        let mut app = app(Some(0));
        assert!(!app.apply(Action::Analyze));
        app.apply(Action::Reveal);
        assert!(app.apply(Action::Analyze));
        app.branch_next();
        app.branch_next();
        assert_eq!(app.branch_cursor, 1);
        assert!(app.select_branch(app.branch_cursor));
        match app.session.view() {
            View::Adaptive { branch } => assert_eq!(branch.id, "b2"),
            other => panic!("expected adaptive view, got {}", other.name()),
        }

        // Back from remediation keeps the cursor on the chosen branch.
        assert!(app.apply(Action::Back));
        assert_eq!(app.branch_cursor, 1);
    }

    #[test]
    fn test_scroll_is_bounded_by_last_frame() {
        let mut app = app(Some(0));
        app.max_scroll.set(5);
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.scroll, 5);
        app.scroll_up();
        assert_eq!(app.scroll, 2);
        app.scroll_up();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_settings_scroll_step_bounds() {
        let mut app = app(None);
        app.settings_selected = 1;
        app.config.scroll_step = 20;
        app.settings_cycle_forward();
        assert_eq!(app.config.scroll_step, 20);
        app.config.scroll_step = 1;
        app.settings_cycle_backward();
        assert_eq!(app.config.scroll_step, 1);
    }

    #[test]
    fn test_theme_cycles_through_bundled_themes() {
        let mut app = app(None);
        let start = app.config.theme.clone();
        let count = Theme::available_themes().len();
        for _ in 0..count {
            app.settings_cycle_forward();
        }
        assert_eq!(app.config.theme, start);
        app.settings_cycle_backward();
        assert_ne!(app.config.theme, start);
        assert_eq!(app.theme.name, app.config.theme);
    }
}
