mod draw_panel;
mod results_panel;

pub use draw_panel::draw_panel;
pub use results_panel::results_panel;

/// Heading shown on both screens.
pub const APP_TAGLINE: &str = "Draw your imagination and watch AI bring it to life";
