//! Dashboard state: the session, the measurement form and fetched results.

use tracing::{info, warn};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::models::{MetricsReport, PredictionRequest};

pub const ZERO_INPUT_MESSAGE: &str =
    "Please enter non-zero values for the flower measurements.";

/// Which page the session is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Prediction,
    Metrics,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::Prediction => "Prediction page",
            View::Metrics => "Metrics page",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Prediction, View::Metrics]
    }
}

/// Per-session state. Lives as long as the dashboard process and is
/// handed explicitly to every render and event call.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub view: View,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            view: View::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// A numeric field with a lower bound and a step, edited as text.
#[derive(Debug, Clone)]
pub struct NumberInput {
    pub label: &'static str,
    text: String,
    min: f64,
    step: f64,
    /// Cleared after stepping so the next keystroke replaces the value.
    typing: bool,
}

impl NumberInput {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            text: format_value(0.0),
            min: 0.0,
            step: 0.1,
            typing: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.text.parse::<f64>().unwrap_or(self.min).max(self.min)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn increment(&mut self) {
        self.set(self.value() + self.step);
    }

    pub fn decrement(&mut self) {
        self.set(self.value() - self.step);
    }

    pub fn push_char(&mut self, c: char) {
        if !self.typing {
            self.text.clear();
            self.typing = true;
        }
        match c {
            '0'..='9' => self.text.push(c),
            '.' if !self.text.contains('.') => self.text.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        self.typing = true;
        self.text.pop();
    }

    fn set(&mut self, value: f64) {
        // Round to hundredths so repeated steps don't drift.
        let value = ((value * 100.0).round() / 100.0).max(self.min);
        self.text = format_value(value);
        self.typing = false;
    }
}

fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Outcome of the last prediction attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    /// Rejected locally; nothing was sent.
    Invalid(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricsState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(MetricsReport),
    Failed(String),
}

/// Work that needs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Submit,
    FetchMetrics,
}

pub struct App {
    pub session: Session,
    pub api_url: String,
    pub inputs: [NumberInput; 4],
    pub focus: usize,
    pub notice: Option<Notice>,
    pub metrics: MetricsState,
    pub should_quit: bool,
}

impl App {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            session: Session::new(),
            api_url: api_url.into(),
            inputs: [
                NumberInput::new("Sepal Length"),
                NumberInput::new("Sepal Width"),
                NumberInput::new("Petal Length"),
                NumberInput::new("Petal Width"),
            ],
            focus: 0,
            notice: None,
            metrics: MetricsState::NotLoaded,
            should_quit: false,
        }
    }

    /// Switch pages. Entering the metrics page asks for a fresh report.
    pub fn select_view(&mut self, view: View) -> Option<Action> {
        self.session.view = view;
        match view {
            View::Metrics => Some(Action::FetchMetrics),
            View::Prediction => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.inputs.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn focused_input(&mut self) -> &mut NumberInput {
        self.notice = None;
        &mut self.inputs[self.focus]
    }

    pub fn request(&self) -> PredictionRequest {
        let [sl, sw, pl, pw] = &self.inputs;
        PredictionRequest::new(sl.value(), sw.value(), pl.value(), pw.value())
    }

    /// Show that a slow action is underway before it blocks.
    pub fn mark_pending(&mut self, action: Action) {
        if action == Action::FetchMetrics {
            self.metrics = MetricsState::Loading;
        }
    }

    pub fn perform(&mut self, action: Action, client: &ApiClient) {
        match action {
            Action::Submit => self.submit(client),
            Action::FetchMetrics => self.fetch_metrics(client),
        }
    }

    pub fn submit(&mut self, client: &ApiClient) {
        let request = self.request();
        if request.is_all_zero() {
            self.notice = Some(Notice::Invalid(ZERO_INPUT_MESSAGE.to_string()));
            return;
        }

        self.notice = Some(match client.predict(&request) {
            Ok(label) => {
                info!(session = %self.session.id, %label, "prediction received");
                Notice::Success(format!("The predicted flower is: {label}"))
            }
            Err(e) => {
                warn!(session = %self.session.id, "prediction failed: {e}");
                Notice::Error(e.to_string())
            }
        });
    }

    pub fn fetch_metrics(&mut self, client: &ApiClient) {
        self.metrics = match client.metrics() {
            Ok(report) => MetricsState::Loaded(report),
            Err(e) => {
                warn!(session = %self.session.id, "metrics fetch failed: {e}");
                MetricsState::Failed(e.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_default_to_zero() {
        let app = App::new("http://localhost:8000");
        assert!(app.request().is_all_zero());
        assert_eq!(app.inputs[0].text(), "0.00");
    }

    #[test]
    fn stepping_never_goes_below_zero() {
        let mut input = NumberInput::new("Sepal Length");
        input.decrement();
        assert_eq!(input.value(), 0.0);

        input.increment();
        input.increment();
        input.increment();
        assert_eq!(input.text(), "0.30");
        assert!((input.value() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn typing_replaces_a_stepped_value() {
        let mut input = NumberInput::new("Petal Width");
        input.increment();
        for c in "5.1".chars() {
            input.push_char(c);
        }
        assert_eq!(input.text(), "5.1");
        assert!((input.value() - 5.1).abs() < 1e-12);
    }

    #[test]
    fn typing_ignores_non_numeric_characters() {
        let mut input = NumberInput::new("Petal Width");
        for c in "1.2.3x".chars() {
            input.push_char(c);
        }
        assert_eq!(input.text(), "1.23");
        input.backspace();
        assert_eq!(input.text(), "1.2");
    }

    #[test]
    fn emptied_field_reads_as_minimum() {
        let mut input = NumberInput::new("Sepal Width");
        input.push_char('4');
        input.backspace();
        assert_eq!(input.text(), "");
        assert_eq!(input.value(), 0.0);
    }

    #[test]
    fn request_uses_model_field_order() {
        let mut app = App::new("http://localhost:8000");
        for (i, text) in ["5.1", "3.5", "1.4", "0.2"].iter().enumerate() {
            app.focus = i;
            for c in text.chars() {
                app.focused_input().push_char(c);
            }
        }
        assert_eq!(app.request(), PredictionRequest::new(5.1, 3.5, 1.4, 0.2));
    }

    #[test]
    fn focus_wraps_around() {
        let mut app = App::new("http://localhost:8000");
        app.focus_previous();
        assert_eq!(app.focus, 3);
        app.focus_next();
        assert_eq!(app.focus, 0);
    }

    #[test]
    fn entering_metrics_view_requests_a_fetch() {
        let mut app = App::new("http://localhost:8000");
        assert_eq!(app.select_view(View::Metrics), Some(Action::FetchMetrics));
        assert_eq!(app.session.view, View::Metrics);
        assert_eq!(app.select_view(View::Prediction), None);
        assert_eq!(app.session.view, View::Prediction);
    }

    #[test]
    fn session_survives_view_switches() {
        let mut app = App::new("http://localhost:8000");
        let id = app.session.id;
        app.select_view(View::Metrics);
        app.select_view(View::Prediction);
        assert_eq!(app.session.id, id);
    }

    #[test]
    fn editing_clears_previous_notice() {
        let mut app = App::new("http://localhost:8000");
        app.notice = Some(Notice::Invalid(ZERO_INPUT_MESSAGE.to_string()));
        app.focused_input().increment();
        assert!(app.notice.is_none());
    }
}
