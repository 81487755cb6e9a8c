pub mod control;
mod measured_rows;
pub mod text_edit_state;
pub mod textarea;
pub mod utils;
mod window_surface;

#[cfg(test)]
mod test_component_smoke;
#[cfg(test)]
mod test_state_logic;

pub use textarea::{AutosizeTextarea, ChangeSource, TextareaChangeEvent};
