pub mod catalog;
pub mod model;

pub use catalog::{Catalog, CatalogError};
pub use model::{Branch, Category, InputKind, Problem, Question, Remediation, RemediationKind};
