//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nebula_navigator::Navigator;
use nebula_value::codec;
use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Navigator over decoded JSON text
pub fn nav(text: &str) -> Navigator {
    Navigator::new(codec::decode(text).expect("valid JSON"))
}

/// Layer counting `WARN` events and collecting their `dropped` field
#[derive(Clone, Default)]
pub struct WarnCounter {
    warnings: Arc<AtomicUsize>,
    dropped: Arc<Mutex<Vec<u64>>>,
}

impl WarnCounter {
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    pub fn dropped(&self) -> Vec<u64> {
        self.dropped.lock().clone()
    }
}

struct DroppedField(Option<u64>);

impl Visit for DroppedField {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "dropped" {
            self.0 = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        self.warnings.fetch_add(1, Ordering::SeqCst);
        let mut field = DroppedField(None);
        event.record(&mut field);
        if let Some(dropped) = field.0 {
            self.dropped.lock().push(dropped);
        }
    }
}

/// Run `f` with a subscriber that counts warnings
pub fn with_warnings<R>(f: impl FnOnce() -> R) -> (R, WarnCounter) {
    let counter = WarnCounter::default();
    let subscriber = Registry::default().with(counter.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, counter)
}
