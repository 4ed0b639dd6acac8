use std::collections::HashMap;

/// What the learner has entered for one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInput {
    /// Free text, or the chosen option of a single-choice question.
    Single(String),
    /// Chosen options of a multi-choice question, in the order they were picked.
    Multi(Vec<String>),
}

/// Per-question input for the active problem, keyed by question id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserInputs {
    entries: HashMap<String, UserInput>,
}

impl UserInputs {
    pub fn get(&self, question_id: &str) -> Option<&UserInput> {
        self.entries.get(question_id)
    }

    pub fn text(&self, question_id: &str) -> Option<&str> {
        match self.entries.get(question_id) {
            Some(UserInput::Single(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Store `value` as the single answer. Returns false when nothing changed.
    pub fn set_single(&mut self, question_id: &str, value: &str) -> bool {
        if self.text(question_id) == Some(value) {
            return false;
        }
        self.entries
            .insert(question_id.to_string(), UserInput::Single(value.to_string()));
        true
    }

    /// Add `option` to the selection if absent, remove it if present. An
    /// emptied selection drops the entry entirely.
    pub fn toggle(&mut self, question_id: &str, option: &str) {
        let mut selected = match self.entries.remove(question_id) {
            Some(UserInput::Multi(selected)) => selected,
            _ => Vec::new(),
        };
        match selected.iter().position(|o| o == option) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(option.to_string()),
        }
        if !selected.is_empty() {
            self.entries
                .insert(question_id.to_string(), UserInput::Multi(selected));
        }
    }

    pub fn is_selected(&self, question_id: &str, option: &str) -> bool {
        match self.entries.get(question_id) {
            Some(UserInput::Single(value)) => value == option,
            Some(UserInput::Multi(selected)) => selected.iter().any(|o| o == option),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_single_upserts() {
        let mut inputs = UserInputs::default();
        assert!(inputs.set_single("q1", "water"));
        assert!(inputs.set_single("q1", "H2O"));
        assert_eq!(inputs.text("q1"), Some("H2O"));
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn test_set_single_same_value_reports_unchanged() {
        let mut inputs = UserInputs::default();
        inputs.set_single("q1", "a");
        assert!(!inputs.set_single("q1", "a"));
    }

    #[test]
    fn test_toggle_keeps_pick_order() {
        let mut inputs = UserInputs::default();
        inputs.toggle("q", "b");
        inputs.toggle("q", "a");
        assert_eq!(
            inputs.get("q"),
            Some(&UserInput::Multi(vec!["b".to_string(), "a".to_string()]))
        );
        assert!(inputs.is_selected("q", "a"));
        assert!(!inputs.is_selected("q", "c"));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut inputs = UserInputs::default();
        inputs.toggle("q", "keep");
        let before = inputs.clone();

        inputs.toggle("q", "x");
        inputs.toggle("q", "x");
        assert_eq!(inputs, before);

        inputs.toggle("q", "keep");
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_text_ignores_multi_entries() {
        let mut inputs = UserInputs::default();
        inputs.toggle("q", "a");
        assert_eq!(inputs.text("q"), None);
    }
}
