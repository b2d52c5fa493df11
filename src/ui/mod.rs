mod renderer;
mod state;
pub mod theme;

pub use renderer::render;
pub use state::{AppState, InputField, LoginField, Screen};
pub use theme::Theme;
