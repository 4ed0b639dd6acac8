use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Knowledge,
    Principle,
    Judgment,
    Skill,
}

impl Category {
    pub fn badge(self) -> &'static str {
        match self {
            Category::Knowledge => "KNOWLEDGE",
            Category::Principle => "PRINCIPLE",
            Category::Judgment => "JUDGMENT",
            Category::Skill => "SKILL",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Text,
    SelectionSingle,
    SelectionMulti,
}

impl InputKind {
    pub fn is_choice(self) -> bool {
        matches!(self, InputKind::SelectionSingle | InputKind::SelectionMulti)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub text: String,
    pub input: InputKind,
    /// Choices offered, in display order. Empty for free-text questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationKind {
    Knowledge,
    Exercise,
}

impl RemediationKind {
    pub fn badge(self) -> &'static str {
        match self {
            RemediationKind::Knowledge => "KNOWLEDGE CHECK",
            RemediationKind::Exercise => "EXERCISE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    pub kind: RemediationKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<String>,
}

/// One possible root cause for a learner getting stuck on a problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub title: String,
    pub label: String,
    pub diagnosis: String,
    pub remediation: Remediation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub equations: Vec<String>,
    pub questions: Vec<Question>,
    /// Model answers keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default)]
    pub explanation_points: Vec<String>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Problem {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }
}
