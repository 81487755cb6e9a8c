pub mod autosize;
pub mod components;
pub mod contracts;
pub mod id;
pub mod prelude;
pub mod style;
pub mod theme;

pub use components::{AutosizeTextarea, ChangeSource, TextareaChangeEvent};
