//! Observer that keeps every event for later assertions

use specify_project::{Step, StepObserver};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Complete,
    Error,
    Skip,
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(Event, Step, String)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Event, Step, String)> {
        self.events.lock().unwrap().clone()
    }

    /// Last event recorded for `step`
    pub fn last(&self, step: Step) -> Option<(Event, String)> {
        self.events()
            .into_iter()
            .rev()
            .find(|(_, s, _)| *s == step)
            .map(|(event, _, detail)| (event, detail))
    }

    fn push(&self, event: Event, step: Step, detail: &str) {
        self.events
            .lock()
            .unwrap()
            .push((event, step, detail.to_string()));
    }
}

impl StepObserver for RecordingObserver {
    fn on_start(&self, step: Step, detail: &str) {
        self.push(Event::Start, step, detail);
    }

    fn on_complete(&self, step: Step, detail: &str) {
        self.push(Event::Complete, step, detail);
    }

    fn on_error(&self, step: Step, detail: &str) {
        self.push(Event::Error, step, detail);
    }

    fn on_skip(&self, step: Step, detail: &str) {
        self.push(Event::Skip, step, detail);
    }
}
