#![warn(clippy::pedantic)]

pub mod log;

mod rest_timer;
mod state;

pub use rest_timer::{REST_SECONDS, RestTimer, second_interval};
pub use state::{AppState, Summary};
