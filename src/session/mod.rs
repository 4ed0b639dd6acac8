pub mod input;
pub mod state;

pub use input::UserInput;
pub use state::{Action, Session, View};
