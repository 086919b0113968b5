use std::sync::{Arc, Mutex};

use gruntcfg::diagnostics::Diagnostics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Title(String),
    Line(String),
    Action(String),
    Success(String),
    Failure {
        message: String,
        detail: Option<String>,
    },
}

impl Event {
    pub fn message(&self) -> &str {
        match self {
            Event::Title(m)
            | Event::Line(m)
            | Event::Action(m)
            | Event::Success(m)
            | Event::Failure { message: m, .. } => m,
        }
    }
}

/// Diagnostics sink that keeps every event.
///
/// Clones share the log, so hand one clone to the code under test and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(|e| e.message().to_string()).collect()
    }

    pub fn failures(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Failure { .. }))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events().iter().any(|e| e.message().contains(needle))
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn title(&self, title: &str) {
        self.push(Event::Title(title.to_string()));
    }

    fn line(&self, message: &str) {
        self.push(Event::Line(message.to_string()));
    }

    fn action(&self, message: &str) {
        self.push(Event::Action(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Event::Success(message.to_string()));
    }

    fn failure(&self, message: &str, detail: Option<&str>) {
        self.push(Event::Failure {
            message: message.to_string(),
            detail: detail.map(str::to_string),
        });
    }
}
