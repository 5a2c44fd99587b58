//! Ratatui front-end: a sidebar with the five library views, a content pane
//! holding the active form or table, and a footer for status and key hints.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
