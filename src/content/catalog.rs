use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::content::model::{InputKind, Problem};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog contains no problems")]
    Empty,
    #[error("duplicate problem id '{0}'")]
    DuplicateProblem(String),
    #[error("problem '{problem}': duplicate question id '{question}'")]
    DuplicateQuestion { problem: String, question: String },
    #[error("problem '{problem}': duplicate branch id '{branch}'")]
    DuplicateBranch { problem: String, branch: String },
    #[error("problem '{problem}': question '{question}' is a selection but has no options")]
    MissingOptions { problem: String, question: String },
    #[error("problem '{problem}': question '{question}' is free text but lists options")]
    UnexpectedOptions { problem: String, question: String },
    #[error("problem '{problem}': answer given for unknown question '{question}'")]
    UnknownAnswer { problem: String, question: String },
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    problems: Vec<Problem>,
}

/// Ordered, read-only list of problems. Always non-empty once constructed.
#[derive(Clone, Debug)]
pub struct Catalog {
    problems: Vec<Problem>,
}

impl Catalog {
    pub fn new(problems: Vec<Problem>) -> Result<Self, CatalogError> {
        validate(&problems)?;
        Ok(Self { problems })
    }

    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.problems)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&content)?;
        info!(path = %path.display(), problems = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_toml(BUNDLED_CATALOG)?;
        debug!(problems = catalog.len(), "loaded bundled catalog");
        Ok(catalog)
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn last_index(&self) -> usize {
        self.problems.len().saturating_sub(1)
    }
}

/// Authoring checks run once at load time. The session never re-validates.
fn validate(problems: &[Problem]) -> Result<(), CatalogError> {
    if problems.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut problem_ids = HashSet::new();
    for problem in problems {
        if !problem_ids.insert(problem.id.as_str()) {
            return Err(CatalogError::DuplicateProblem(problem.id.clone()));
        }

        let mut question_ids = HashSet::new();
        for question in &problem.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(CatalogError::DuplicateQuestion {
                    problem: problem.id.clone(),
                    question: question.id.clone(),
                });
            }
            match (question.input, question.options.is_empty()) {
                (InputKind::SelectionSingle | InputKind::SelectionMulti, true) => {
                    return Err(CatalogError::MissingOptions {
                        problem: problem.id.clone(),
                        question: question.id.clone(),
                    });
                }
                (InputKind::Text, false) => {
                    return Err(CatalogError::UnexpectedOptions {
                        problem: problem.id.clone(),
                        question: question.id.clone(),
                    });
                }
                _ => {}
            }
        }

        let mut branch_ids = HashSet::new();
        for branch in &problem.branches {
            if !branch_ids.insert(branch.id.as_str()) {
                return Err(CatalogError::DuplicateBranch {
                    problem: problem.id.clone(),
                    branch: branch.id.clone(),
                });
            }
        }

        // Sorted so the reported id is stable across runs.
        let mut answer_ids: Vec<&String> = problem.answers.keys().collect();
        answer_ids.sort();
        if let Some(unknown) = answer_ids.into_iter().find(|id| !question_ids.contains(id.as_str())) {
            return Err(CatalogError::UnknownAnswer {
                problem: problem.id.clone(),
                question: unknown.clone(),
            });
        }
    }

    Ok(())
}
