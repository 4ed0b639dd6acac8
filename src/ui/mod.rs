pub mod answer_editor;
pub mod components;
pub mod layout;
pub mod theme;
