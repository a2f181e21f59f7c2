//! Tracing bridge to the browser console.
//!
//! [`ConsoleLayer`] flattens each event into one line and hands it to a
//! sink. In the browser the sink is `console.error` / `console.warn` /
//! `console.info` / `console.debug` picked by level; elsewhere it is stderr.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

type Sink = Box<dyn Fn(Level, &str) + Send + Sync>;

// ============================================================================
// Event Visitor
// ============================================================================

/// Collects the message and structured fields of one event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        self.push(field, strip_debug_quotes(&rendered).to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.to_string());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.to_string());
    }
}

fn strip_debug_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// `LEVEL target: message key=value ...`
pub fn format_line(
    level: Level,
    target: &str,
    message: &str,
    fields: &[(&str, String)],
) -> String {
    let mut line = format!("{level} {target}: {message}");
    for (key, value) in fields {
        let _ = write!(line, " {key}={value}");
    }
    line
}

// ============================================================================
// Layer
// ============================================================================

pub struct ConsoleLayer {
    max_level: Level,
    sink: Sink,
}

impl ConsoleLayer {
    /// Layer writing to the platform console.
    pub fn new(max_level: Level) -> Self {
        Self::with_sink(max_level, emit)
    }

    pub fn with_sink(
        max_level: Level,
        sink: impl Fn(Level, &str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            max_level,
            sink: Box::new(sink),
        }
    }
}

impl<S> Layer<S> for ConsoleLayer
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &tracing::Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let metadata = event.metadata();
        let line = format_line(
            *metadata.level(),
            metadata.target(),
            visitor.message.as_deref().unwrap_or_default(),
            &visitor.fields,
        );
        (self.sink)(*metadata.level(), &line);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Console verbosity for a build. Per-event dispatch traces are `debug!`,
/// so release builds stop at `INFO`.
pub fn level_for(debug_build: bool) -> Level {
    if debug_build {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

pub fn default_level() -> Level {
    level_for(cfg!(debug_assertions))
}

/// Install the console layer as the global subscriber. A second call is
/// a no-op.
pub fn init(max_level: Level) {
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::new(max_level));
    let _ = tracing::subscriber::set_global_default(subscriber);
}
