//! Checks the events emitted while validating.

#![cfg(feature = "tracing")]

use ruleval::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
}

#[derive(Clone, Default)]
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let capture = EventCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture.events()
}

#[test]
fn configuration_errors_are_logged_as_warnings() {
    let events = capture(|| {
        let mut v = Validator::make(record(json!({ "a": "x" })), [("a", "no_such_rule")]);
        assert!(v.passes().is_err());
    });

    assert!(events
        .iter()
        .any(|e| e.level == Level::WARN && e.message.contains("invalid rule configuration")));
}

#[test]
fn failing_rules_are_traced() {
    let events = capture(|| {
        let mut v = Validator::make(record(json!({ "name": "" })), [("name", "required|min:3")]);
        assert!(v.fails().unwrap());
    });

    let failures = events
        .iter()
        .filter(|e| e.level == Level::TRACE && e.message.contains("rule failed"))
        .count();
    assert_eq!(failures, 2);
    assert!(events
        .iter()
        .any(|e| e.level == Level::DEBUG && e.message.contains("validation finished")));
}

#[test]
fn empty_record_short_circuit_is_logged() {
    let events = capture(|| {
        let mut v = Validator::make(Record::new(), [("date", "date")]);
        assert!(v.passes().unwrap());
    });

    assert!(events
        .iter()
        .any(|e| e.level == Level::DEBUG && e.message.contains("nothing to check")));
}

#[test]
fn invalid_patterns_are_warned_once() {
    let events = capture(|| {
        let mut v = Validator::make(record(json!({ "r": "x" })), [("r", "regex:/([a-z/")]);
        assert!(matches!(v.passes(), Err(ConfigError::InvalidPattern { .. })));
    });

    let warnings: Vec<_> = events.iter().filter(|e| e.level == Level::WARN).collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("invalid rule configuration"));
}
