pub mod particles;
mod win_screen;

pub use win_screen::WinScreen;
