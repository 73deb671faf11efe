//! Terminal dashboard that drives the prediction service.

mod app;
mod chart;
mod event;
mod ui;

pub use app::{Action, App, MetricsState, Notice, NumberInput, Session, View, ZERO_INPUT_MESSAGE};
pub use event::{handle_key_event, poll_event};
pub use ui::draw_ui;
