//! Step callbacks for the acquisition pipeline
//!
//! The pipeline reports each stage through a [`StepObserver`] so the CLI can
//! drive its live tracker from the same call stack that performs the I/O.

/// Stages reported while scaffolding a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Fetch,
    Download,
    Extract,
    ZipList,
    ExtractedSummary,
    Cleanup,
    Chmod,
    Context,
    Instructions,
    Docs,
    Git,
    Final,
}

impl Step {
    /// Stages in display order
    pub const PIPELINE: [Step; 12] = [
        Step::Fetch,
        Step::Download,
        Step::Extract,
        Step::ZipList,
        Step::ExtractedSummary,
        Step::Cleanup,
        Step::Chmod,
        Step::Context,
        Step::Instructions,
        Step::Docs,
        Step::Git,
        Step::Final,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Download => "download",
            Self::Extract => "extract",
            Self::ZipList => "zip-list",
            Self::ExtractedSummary => "extracted-summary",
            Self::Cleanup => "cleanup",
            Self::Chmod => "chmod",
            Self::Context => "context",
            Self::Instructions => "instructions",
            Self::Docs => "docs",
            Self::Git => "git",
            Self::Final => "final",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fetch => "Fetch latest release",
            Self::Download => "Download template",
            Self::Extract => "Extract template",
            Self::ZipList => "Archive contents",
            Self::ExtractedSummary => "Extraction summary",
            Self::Cleanup => "Cleanup",
            Self::Chmod => "Ensure scripts executable",
            Self::Context => "Create project context",
            Self::Instructions => "Create instructions.md",
            Self::Docs => "Create docs scaffolding",
            Self::Git => "Initialize git repository",
            Self::Final => "Finalize",
        }
    }
}

/// Receives stage transitions
///
/// `detail` is a short note shown next to the step label and may be empty.
pub trait StepObserver: Send + Sync {
    fn on_start(&self, step: Step, detail: &str);

    fn on_complete(&self, step: Step, detail: &str);

    fn on_error(&self, step: Step, detail: &str);

    fn on_skip(&self, step: Step, detail: &str) {
        let _ = (step, detail);
    }
}
