use std::fmt;

/// Stages of one pipeline run.
///
/// A run moves strictly forward; `ErrorPresented` is absorbing and reachable
/// from any non-idle stage. Both presented states return to `Idle` when the
/// user closes the result or starts a new gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Capturing,
    Recognizing,
    Classifying,
    Translating,
    Presented,
    ErrorPresented,
}

impl PipelineState {
    pub fn may_advance_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        match (self, next) {
            (Idle, Capturing) => true,
            (Capturing, Recognizing) => true,
            // Empty OCR output skips classification and translation.
            (Recognizing, Classifying) | (Recognizing, Presented) => true,
            (Classifying, Translating) => true,
            (Translating, Presented) => true,
            (Presented, Idle) | (ErrorPresented, Idle) => true,
            (from, ErrorPresented) => from != Idle,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Presented | PipelineState::ErrorPresented)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Capturing => "capturing",
            PipelineState::Recognizing => "recognizing",
            PipelineState::Classifying => "classifying",
            PipelineState::Translating => "translating",
            PipelineState::Presented => "presented",
            PipelineState::ErrorPresented => "error-presented",
        };
        f.write_str(name)
    }
}
