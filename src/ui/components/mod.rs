pub mod adaptive_view;
pub mod analysis_view;
pub mod formula_text;
pub mod home;
pub mod problem_view;
pub mod scroll_view;
