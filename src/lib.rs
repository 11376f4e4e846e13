pub mod args;
pub mod history;
mod lenient;
pub mod logging;
pub mod roster;
