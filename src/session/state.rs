use tracing::{debug, trace};

use crate::content::{Branch, Catalog, InputKind, Problem};
use crate::session::input::{UserInput, UserInputs};

/// The active screen. Only `Adaptive` carries a branch, so a selected branch
/// exists exactly when the learner is looking at a remediation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View<'a> {
    Home,
    Problem,
    Analysis,
    Adaptive { branch: &'a Branch },
}

impl View<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Problem => "problem",
            View::Analysis => "analysis",
            View::Adaptive { .. } => "adaptive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    Home,
    Next,
    Prev,
    Reveal,
    Analyze,
    Back,
    /// Replace the free-text answer of a question.
    EditText { question: String, value: String },
    /// Pick an option: replaces for single-choice, toggles for multi-choice.
    Choose { question: String, option: String },
    /// Open the remediation for a branch of the current problem, by id.
    SelectBranch(String),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Home => "home",
            Action::Next => "next",
            Action::Prev => "prev",
            Action::Reveal => "reveal",
            Action::Analyze => "analyze",
            Action::Back => "back",
            Action::EditText { .. } => "edit_text",
            Action::Choose { .. } => "choose",
            Action::SelectBranch(_) => "select_branch",
        }
    }
}

pub struct Session<'a> {
    catalog: &'a Catalog,
    view: View<'a>,
    index: usize,
    revealed: bool,
    inputs: UserInputs,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_index(catalog, 0)
    }

    /// Start on `index`, clamped to the catalog.
    pub fn with_index(catalog: &'a Catalog, index: usize) -> Self {
        Self {
            catalog,
            view: View::Home,
            index: index.min(catalog.last_index()),
            revealed: false,
            inputs: UserInputs::default(),
        }
    }

    /// Apply one action. Actions that do not apply to the current view, or
    /// whose precondition fails, leave the session untouched and return false.
    pub fn apply(&mut self, action: Action) -> bool {
        let name = action.name();
        let changed = match (self.view, action) {
            (View::Home, Action::Start) => self.set_view(View::Problem),
            (View::Problem, Action::Home) | (View::Adaptive { .. }, Action::Home) => {
                self.set_view(View::Home)
            }
            (View::Problem, Action::Next) => self.go_to(self.index + 1),
            (View::Problem, Action::Prev) => match self.index.checked_sub(1) {
                Some(prev) => self.go_to(prev),
                None => false,
            },
            (View::Problem, Action::Reveal) => !std::mem::replace(&mut self.revealed, true),
            (View::Problem, Action::Analyze) if self.revealed => self.set_view(View::Analysis),
            (View::Problem, Action::EditText { question, value }) => {
                self.edit_text(&question, &value)
            }
            (View::Problem, Action::Choose { question, option }) => self.choose(&question, &option),
            (View::Analysis, Action::SelectBranch(id)) => {
                let problem = self.current_problem();
                match problem.branch(&id) {
                    Some(branch) => self.set_view(View::Adaptive { branch }),
                    None => false,
                }
            }
            (View::Analysis, Action::Back) => self.set_view(View::Problem),
            (View::Adaptive { .. }, Action::Back) => self.set_view(View::Analysis),
            _ => false,
        };

        if changed {
            debug!(
                action = name,
                view = self.view.name(),
                index = self.index,
                revealed = self.revealed,
                "session transition"
            );
        } else {
            trace!(action = name, view = self.view.name(), "action ignored");
        }
        changed
    }

    fn set_view(&mut self, view: View<'a>) -> bool {
        self.view = view;
        true
    }

    /// Move to another problem, dropping everything tied to the old one.
    fn go_to(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() || index == self.index {
            return false;
        }
        self.index = index;
        self.revealed = false;
        self.inputs.clear();
        true
    }

    fn edit_text(&mut self, question_id: &str, value: &str) -> bool {
        if self.revealed {
            return false;
        }
        match self.current_problem().question(question_id) {
            Some(question) if question.input == InputKind::Text => {
                self.inputs.set_single(question_id, value)
            }
            _ => false,
        }
    }

    fn choose(&mut self, question_id: &str, option: &str) -> bool {
        if self.revealed {
            return false;
        }
        let Some(question) = self.current_problem().question(question_id) else {
            return false;
        };
        if !question.offers(option) {
            return false;
        }
        match question.input {
            InputKind::SelectionSingle => self.inputs.set_single(question_id, option),
            InputKind::SelectionMulti => {
                self.inputs.toggle(question_id, option);
                true
            }
            InputKind::Text => false,
        }
    }

    pub fn view(&self) -> View<'a> {
        self.view
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn problem_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn current_problem(&self) -> &'a Problem {
        &self.catalog.problems()[self.index]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn inputs(&self) -> &UserInputs {
        &self.inputs
    }

    pub fn input(&self, question_id: &str) -> Option<&UserInput> {
        self.inputs.get(question_id)
    }

    pub fn is_selected(&self, question_id: &str, option: &str) -> bool {
        self.inputs.is_selected(question_id, option)
    }

    pub fn selected_branch(&self) -> Option<&'a Branch> {
        match self.view {
            View::Adaptive { branch } => Some(branch),
            _ => None,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index < self.catalog.last_index()
    }

    pub fn can_analyze(&self) -> bool {
        self.view == View::Problem && self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Category, Question, Remediation, RemediationKind};
    use std::collections::HashMap;

    fn question(id: &str, input: InputKind, options: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            label: format!("({id})"),
            category: Category::Knowledge,
            text: format!("Question {id}"),
            input,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn branch(id: &str) -> Branch {
        Branch {
            id: id.to_string(),
            title: format!("Branch {id}"),
            label: "Stuck".to_string(),
            diagnosis: "Diagnosis".to_string(),
            remediation: Remediation {
                kind: RemediationKind::Exercise,
                content: "Try again".to_string(),
                points: Vec::new(),
            },
        }
    }

    fn catalog(count: usize) -> Catalog {
        let problems = (0..count)
            .map(|i| Problem {
                id: format!("p{i}"),
                title: format!("Problem {i}"),
                description: None,
                equations: Vec::new(),
                questions: vec![
                    question("text", InputKind::Text, &[]),
                    question("single", InputKind::SelectionSingle, &["a", "b"]),
                    question("multi", InputKind::SelectionMulti, &["x", "y", "z"]),
                ],
                answers: HashMap::from([("text".to_string(), "answer".to_string())]),
                explanation_points: Vec::new(),
                branches: vec![branch("b1"), branch("b2")],
            })
            .collect();
        Catalog::new(problems).unwrap()
    }

    fn edit(question: &str, value: &str) -> Action {
        Action::EditText {
            question: question.to_string(),
            value: value.to_string(),
        }
    }

    fn choose(question: &str, option: &str) -> Action {
        Action::Choose {
            question: question.to_string(),
            option: option.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let catalog = catalog(3);
        let session = Session::new(&catalog);
        assert_eq!(session.view(), View::Home);
        assert_eq!(session.index(), 0);
        assert!(!session.is_revealed());
        assert!(session.inputs().is_empty());
        assert!(session.selected_branch().is_none());
    }

    #[test]
    fn test_with_index_clamps() {
        let catalog = catalog(3);
        assert_eq!(Session::with_index(&catalog, 99).index(), 2);
    }

    #[test]
    fn test_start_keeps_index() {
        let catalog = catalog(3);
        let mut session = Session::with_index(&catalog, 1);
        assert!(session.apply(Action::Start));
        assert_eq!(session.view(), View::Problem);
        assert_eq!(session.index(), 1);
    }

    #[test]
    fn test_next_stops_at_last_problem() {
        let catalog = catalog(5);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        for _ in 0..4 {
            assert!(session.apply(Action::Next));
        }
        assert_eq!(session.index(), 4);
        assert!(!session.has_next());
        assert!(!session.apply(Action::Next));
        assert_eq!(session.index(), 4);
    }

    #[test]
    fn test_prev_at_first_problem_is_noop() {
        let catalog = catalog(5);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        assert!(!session.has_prev());
        assert!(!session.apply(Action::Prev));
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn test_problem_change_resets_inputs_and_reveal() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(edit("text", "hello"));
        session.apply(choose("multi", "x"));
        session.apply(Action::Reveal);

        assert!(session.apply(Action::Next));
        assert!(session.inputs().is_empty());
        assert!(!session.is_revealed());

        session.apply(choose("single", "a"));
        session.apply(Action::Reveal);
        assert!(session.apply(Action::Prev));
        assert!(session.inputs().is_empty());
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_navigation_ignored_outside_problem_view() {
        let catalog = catalog(3);
        let mut session = Session::new(&catalog);
        assert!(!session.apply(Action::Next));
        assert!(!session.apply(Action::Reveal));
        assert_eq!(session.index(), 0);
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_single_choice_replaces() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(choose("single", "a"));
        session.apply(choose("single", "b"));
        assert_eq!(session.input("single"), Some(&UserInput::Single("b".to_string())));
        assert!(!session.is_selected("single", "a"));
    }

    #[test]
    fn test_multi_choice_toggle_twice_restores() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(choose("multi", "y"));
        let before = session.inputs().clone();
        session.apply(choose("multi", "z"));
        assert!(session.is_selected("multi", "z"));
        session.apply(choose("multi", "z"));
        assert_eq!(session.inputs(), &before);
    }

    #[test]
    fn test_edits_rejected_after_reveal() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(edit("text", "draft"));
        session.apply(choose("multi", "x"));
        assert!(session.apply(Action::Reveal));

        let before = session.inputs().clone();
        assert!(!session.apply(edit("text", "changed")));
        assert!(!session.apply(choose("multi", "y")));
        assert!(!session.apply(choose("single", "a")));
        assert_eq!(session.inputs(), &before);
    }

    #[test]
    fn test_mismatched_edits_rejected() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        assert!(!session.apply(edit("single", "a")));
        assert!(!session.apply(choose("text", "a")));
        assert!(!session.apply(choose("single", "not-an-option")));
        assert!(!session.apply(edit("missing", "a")));
        assert!(session.inputs().is_empty());
    }

    #[test]
    fn test_reveal_twice_reports_unchanged() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        assert!(session.apply(Action::Reveal));
        assert!(!session.apply(Action::Reveal));
    }

    #[test]
    fn test_analyze_requires_reveal() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        assert!(!session.can_analyze());
        assert!(!session.apply(Action::Analyze));
        assert_eq!(session.view(), View::Problem);

        session.apply(Action::Reveal);
        assert!(session.can_analyze());
        assert!(session.apply(Action::Analyze));
        assert_eq!(session.view(), View::Analysis);
    }

    #[test]
    fn test_select_branch_enters_adaptive() {
        let catalog = catalog(2);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(Action::Next);
        session.apply(Action::Reveal);
        session.apply(Action::Analyze);

        assert!(session.apply(Action::SelectBranch("b2".to_string())));
        let expected = catalog.get(1).unwrap().branch("b2").unwrap();
        assert_eq!(session.view(), View::Adaptive { branch: expected });
        assert!(std::ptr::eq(session.selected_branch().unwrap(), expected));
    }

    #[test]
    fn test_unknown_branch_is_noop() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(Action::Reveal);
        session.apply(Action::Analyze);
        assert!(!session.apply(Action::SelectBranch("nope".to_string())));
        assert_eq!(session.view(), View::Analysis);
    }

    #[test]
    fn test_back_chain_and_home_clears_branch() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(edit("text", "kept"));
        session.apply(Action::Reveal);
        session.apply(Action::Analyze);
        session.apply(Action::SelectBranch("b1".to_string()));

        assert!(session.apply(Action::Back));
        assert_eq!(session.view(), View::Analysis);
        assert!(session.selected_branch().is_none());

        session.apply(Action::SelectBranch("b1".to_string()));
        assert!(session.apply(Action::Home));
        assert_eq!(session.view(), View::Home);
        assert!(session.selected_branch().is_none());

        // Same problem, so its state survives the trip home.
        session.apply(Action::Start);
        assert!(session.is_revealed());
        assert_eq!(session.inputs().text("text"), Some("kept"));
    }

    #[test]
    fn test_analysis_back_returns_to_problem() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(Action::Reveal);
        session.apply(Action::Analyze);
        assert!(session.apply(Action::Back));
        assert_eq!(session.view(), View::Problem);
        assert!(session.is_revealed());
    }

    #[test]
    fn test_home_not_available_from_analysis() {
        let catalog = catalog(1);
        let mut session = Session::new(&catalog);
        session.apply(Action::Start);
        session.apply(Action::Reveal);
        session.apply(Action::Analyze);
        assert!(!session.apply(Action::Home));
        assert_eq!(session.view(), View::Analysis);
    }
}
