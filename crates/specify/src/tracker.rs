//! Live step tree shown while a command runs
//!
//! Steps are rendered as a tree under a title. While live, the whole tree is
//! the message of a single indicatif spinner and is cleared on [`StepTracker::finish`],
//! after which the caller prints the final [`StepTracker::render`].

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget};
use specify_project::{Step, StepObserver};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::output::spinner_style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    Error,
    Skipped,
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    label: String,
    status: StepStatus,
    detail: String,
}

pub struct StepTracker {
    title: String,
    steps: Mutex<Vec<Entry>>,
    live: Option<ProgressBar>,
}

impl StepTracker {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Mutex::new(Vec::new()),
            live: None,
        }
    }

    /// Redraw on every change until [`finish`](Self::finish)
    pub fn live(mut self) -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(spinner_style());
        bar.enable_steady_tick(Duration::from_millis(120));
        self.live = Some(bar);
        self.refresh();
        self
    }

    pub fn add(&self, key: &str, label: &str) {
        {
            let mut steps = self.steps();
            if steps.iter().any(|s| s.key == key) {
                return;
            }
            steps.push(Entry {
                key: key.to_string(),
                label: label.to_string(),
                status: StepStatus::Pending,
                detail: String::new(),
            });
        }
        self.refresh();
    }

    pub fn start(&self, key: &str, detail: &str) {
        self.update(key, StepStatus::Running, detail);
    }

    pub fn complete(&self, key: &str, detail: &str) {
        self.update(key, StepStatus::Done, detail);
    }

    pub fn error(&self, key: &str, detail: &str) {
        self.update(key, StepStatus::Error, detail);
    }

    pub fn skip(&self, key: &str, detail: &str) {
        self.update(key, StepStatus::Skipped, detail);
    }

    pub fn status(&self, key: &str) -> Option<StepStatus> {
        self.steps().iter().find(|s| s.key == key).map(|s| s.status)
    }

    /// Stop the live view and clear it from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.live {
            bar.finish_and_clear();
        }
    }

    pub fn render(&self) -> String {
        let steps = self.steps();
        let mut lines = vec![style(&self.title).cyan().to_string()];

        for (i, step) in steps.iter().enumerate() {
            let guide = if i + 1 == steps.len() { "└── " } else { "├── " };
            lines.push(format!("{}{}", style(guide).dim(), render_entry(step)));
        }

        lines.join("\n")
    }

    fn update(&self, key: &str, status: StepStatus, detail: &str) {
        {
            let mut steps = self.steps();
            match steps.iter_mut().find(|s| s.key == key) {
                Some(step) => {
                    step.status = status;
                    if !detail.is_empty() {
                        step.detail = detail.to_string();
                    }
                }
                None => steps.push(Entry {
                    key: key.to_string(),
                    label: key.to_string(),
                    status,
                    detail: detail.to_string(),
                }),
            }
        }
        self.refresh();
    }

    fn refresh(&self) {
        if let Some(bar) = &self.live {
            bar.set_message(self.render());
        }
    }

    fn steps(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.steps.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn render_entry(step: &Entry) -> String {
    let detail = step.detail.trim();

    if step.status == StepStatus::Pending {
        let text = if detail.is_empty() {
            step.label.clone()
        } else {
            format!("{} ({})", step.label, detail)
        };
        return format!("{} {}", style("○").green().dim(), style(text).dim());
    }

    let symbol = match step.status {
        StepStatus::Done => style("●").green(),
        StepStatus::Running => style("○").cyan(),
        StepStatus::Error => style("●").red(),
        StepStatus::Skipped => style("○").yellow(),
        StepStatus::Pending => style("○").dim(),
    };

    if detail.is_empty() {
        format!("{} {}", symbol, step.label)
    } else {
        format!("{} {} {}", symbol, step.label, style(format!("({})", detail)).dim())
    }
}

impl StepObserver for StepTracker {
    fn on_start(&self, step: Step, detail: &str) {
        self.add(step.key(), step.label());
        self.start(step.key(), detail);
    }

    fn on_complete(&self, step: Step, detail: &str) {
        self.add(step.key(), step.label());
        self.complete(step.key(), detail);
    }

    fn on_error(&self, step: Step, detail: &str) {
        self.add(step.key(), step.label());
        self.error(step.key(), detail);
    }

    fn on_skip(&self, step: Step, detail: &str) {
        self.add(step.key(), step.label());
        self.skip(step.key(), detail);
    }
}
