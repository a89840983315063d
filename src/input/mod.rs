mod commands;
pub mod form;
mod keyboard;
mod mouse;
pub mod session;

pub use keyboard::handle_key_input;
pub use mouse::handle_mouse_input;
