//! `tracing` layer writing into a [`LogBuffer`].

use super::buffer::LogBuffer;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Collects the message and fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Appends every event to a shared [`LogBuffer`] as
/// `LEVEL target: message key=value`.
///
/// The buffer is handed in at construction; the host keeps its own clone of
/// the `Arc` to render it.
///
/// ```rust
/// use bubbletea_autocomplete::logview::{LogBuffer, LogViewLayer};
/// use std::sync::{Arc, Mutex};
/// use tracing_subscriber::prelude::*;
///
/// let buffer = Arc::new(Mutex::new(LogBuffer::new()));
/// let subscriber = tracing_subscriber::registry().with(LogViewLayer::new(buffer.clone()));
/// tracing::subscriber::with_default(subscriber, || {
///     tracing::warn!(target: "demo", "disk almost full");
/// });
/// assert_eq!(buffer.lock().unwrap().text(), "WARN demo: disk almost full\n");
/// ```
#[derive(Debug, Clone)]
pub struct LogViewLayer {
    buffer: Arc<Mutex<LogBuffer>>,
}

impl LogViewLayer {
    /// Creates a layer writing into `buffer`.
    pub fn new(buffer: Arc<Mutex<LogBuffer>>) -> Self {
        Self { buffer }
    }

    /// The shared buffer.
    pub fn buffer(&self) -> &Arc<Mutex<LogBuffer>> {
        &self.buffer
    }

    fn format_event(event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = format!(
            "{} {}: {}",
            metadata.level(),
            metadata.target(),
            visitor.message.unwrap_or_default()
        );
        for (key, value) in &visitor.fields {
            let _ = write!(line, " {key}={value}");
        }
        line.push('\n');
        line
    }
}

impl<S> Layer<S> for LogViewLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = Self::format_event(event);
        // a poisoned buffer drops the event
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.append(*event.metadata().level(), &line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::Registry;

    fn capture(f: impl FnOnce()) -> Arc<Mutex<LogBuffer>> {
        let buffer = Arc::new(Mutex::new(LogBuffer::new()));
        let subscriber = Registry::default().with(LogViewLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, f);
        buffer
    }

    #[test]
    fn formats_level_target_message_and_fields() {
        let buffer = capture(|| {
            tracing::info!(target: "app", user = "ann", attempts = 3, "logged in");
        });
        let buffer = buffer.lock().unwrap();
        assert_eq!(buffer.text(), "INFO app: logged in user=ann attempts=3\n");
        assert_eq!(buffer.lines()[0].level, Some(Level::INFO));
    }

    #[test]
    fn events_keep_their_levels() {
        let buffer = capture(|| {
            tracing::error!(target: "app", "first");
            tracing::debug!(target: "app", "second");
        });
        let buffer = buffer.lock().unwrap();
        let levels: Vec<_> = buffer.lines().iter().map(|l| l.level).collect();
        assert_eq!(levels, [Some(Level::ERROR), Some(Level::DEBUG)]);
    }

    #[test]
    fn poisoned_buffer_drops_events_without_panicking() {
        let buffer = Arc::new(Mutex::new(LogBuffer::new()));
        let poison = buffer.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poison.lock().unwrap();
            panic!("poison the buffer");
        })
        .join();
        assert!(buffer.is_poisoned());

        let subscriber = Registry::default().with(LogViewLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("dropped");
        });
    }

    #[test]
    fn controller_transitions_are_logged() {
        use crate::autocomplete::{Entry, EntryCollection, PopupController};
        use crate::{popup, textinput};

        let buffer = capture(|| {
            let entries: EntryCollection = ["Apple", "Apricot"]
                .into_iter()
                .map(|s| Entry::new(s).unwrap())
                .collect();
            let mut controller =
                PopupController::new(textinput::new(), popup::new()).with_entries(entries);
            controller.text_mut().set_value("ap");
            controller.on_text_changed();
            controller.hide();
        });
        let text = buffer.lock().unwrap().text();
        assert!(text.contains("DEBUG bubbletea_autocomplete::autocomplete::controller: popup shown rows=2"));
        assert!(text.contains("popup hidden"));
    }
}
