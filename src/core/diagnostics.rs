use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

const LOG_TARGET: &str = "wirecheck";

/// Which check produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Check,
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Trace,
    Error,
}

/// A single line of the trace a check leaves behind.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticEvent {
    /// Identifies one run of a check; every event of that run shares it.
    pub pass: Uuid,
    pub stage: Stage,
    pub severity: Severity,
    /// Display form of the definition being examined, if any.
    pub definition: Option<String>,
    pub message: String,
}

/// Receives the trace of the checks.
pub trait Diagnostics: Send + Sync {
    fn record(&self, event: DiagnosticEvent);

    fn flush(&self) {}
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn record(&self, event: DiagnosticEvent) {
        match event.severity {
            Severity::Trace => log::info!(target: LOG_TARGET, "[{}] {}", event.pass, event.message),
            Severity::Error => log::error!(target: LOG_TARGET, "[{}] {}", event.pass, event.message),
        }
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _event: DiagnosticEvent) {}
}

/// Simple in-memory collector for events.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    pub fn errors(&self) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == Severity::Error)
            .collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Emits the events of one check run under a shared pass id.
pub(crate) struct Tracer<'a> {
    sink: &'a dyn Diagnostics,
    pass: Uuid,
    stage: Stage,
}

impl<'a> Tracer<'a> {
    pub(crate) fn start(sink: &'a dyn Diagnostics, stage: Stage) -> Self {
        Self {
            sink,
            pass: Uuid::new_v4(),
            stage,
        }
    }

    pub(crate) fn trace(&self, definition: Option<String>, message: impl Into<String>) {
        self.emit(Severity::Trace, definition, message.into());
    }

    pub(crate) fn error(&self, definition: Option<String>, message: impl Into<String>) {
        self.emit(Severity::Error, definition, message.into());
    }

    fn emit(&self, severity: Severity, definition: Option<String>, message: String) {
        self.sink.record(DiagnosticEvent {
            pass: self.pass,
            stage: self.stage,
            severity,
            definition,
            message,
        });
    }
}

impl Drop for Tracer<'_> {
    fn drop(&mut self) {
        self.sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_collects_in_order() {
        let sink = MemoryDiagnostics::new();
        {
            let tracer = Tracer::start(&sink, Stage::Check);
            tracer.trace(None, "first");
            tracer.error(Some("def".to_string()), "second");
        }
        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.errors().len(), 1);
        assert_eq!(sink.errors()[0].definition.as_deref(), Some("def"));
    }

    #[test]
    fn test_each_run_gets_its_own_pass_id() {
        let sink = MemoryDiagnostics::new();
        Tracer::start(&sink, Stage::DryRun).trace(None, "a");
        Tracer::start(&sink, Stage::DryRun).trace(None, "b");
        let events = sink.events();
        assert_ne!(events[0].pass, events[1].pass);
    }

    #[test]
    fn test_event_serializes() {
        let sink = MemoryDiagnostics::new();
        Tracer::start(&sink, Stage::Check).trace(None, "hello");
        let value = serde_json::to_value(&sink.events()[0]).unwrap();
        assert_eq!(value["stage"], "Check");
        assert_eq!(value["severity"], "Trace");
        assert_eq!(value["message"], "hello");
    }

    #[test]
    fn test_noop_and_log_sinks_accept_events() {
        Tracer::start(&NoopDiagnostics, Stage::Check).error(None, "ignored");
        Tracer::start(&LogDiagnostics, Stage::Check).trace(None, "logged");
    }
}
