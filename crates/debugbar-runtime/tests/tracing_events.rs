#![forbid(unsafe_code)]

//! Structured logging emitted by widget construction and attribute writes.

use std::sync::{Arc, Mutex};

use debugbar_core::dict;
use debugbar_runtime::{ClassDescriptor, WidgetClass};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct TraceState {
    construct_classes: Vec<String>,
    messages: Vec<String>,
}

struct TraceCapture {
    state: Arc<Mutex<TraceState>>,
}

impl<S> Layer<S> for TraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() != "widget.construct" {
            return;
        }
        struct ClassField {
            class: Option<String>,
        }
        impl tracing::field::Visit for ClassField {
            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "class" {
                    self.class = Some(format!("{value:?}"));
                }
            }
        }
        let mut visitor = ClassField { class: None };
        attrs.record(&mut visitor);
        if let Some(class) = visitor.class {
            self.state
                .lock()
                .expect("trace lock")
                .construct_classes
                .push(class);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.state.lock().expect("trace lock").messages.push(message);
        }
    }
}

#[test]
fn construction_and_writes_are_traced() {
    let state = Arc::new(Mutex::new(TraceState::default()));
    let subscriber = tracing_subscriber::registry().with(TraceCapture {
        state: Arc::clone(&state),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let class = WidgetClass::base().extend(ClassDescriptor::new("Traced").render(|w, _| {
        w.bind("title", |_, _| {});
    }));
    let widget = class.instantiate(dict! { "title" => "x" });
    widget.set("title", "y");
    let _ = widget.call("nope", &[]);

    let snapshot = state.lock().expect("trace lock");
    assert!(
        snapshot.construct_classes.iter().any(|c| c == "Traced"),
        "expected widget.construct span with class field, got {:?}",
        snapshot.construct_classes
    );
    for expected in ["widget.set", "widget.bind", "widget.rendered", "widget.method_missing"] {
        assert!(
            snapshot.messages.iter().any(|m| m == expected),
            "expected {expected} event, got {:?}",
            snapshot.messages
        );
    }
}
