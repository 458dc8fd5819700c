//! Transient shopper-facing notifications.

use std::io;

use tracing::{info, warn};

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The requested action succeeded.
    Success,

    /// The requested action was refused.
    Error,
}

/// A message for the shopper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,

    /// Text shown to the shopper
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Displays notices. Delivery is fire-and-forget: failures never reach the cart.
pub trait Notifier {
    /// Show a notice.
    fn notify(&mut self, notice: Notice);
}

/// Records notices in order.
impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Emits notices as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message),
            NoticeLevel::Error => warn!(notice = %notice.message),
        }
    }
}

/// Writes notices to an output stream, one per line.
#[derive(Debug)]
pub struct WriterNotifier<W> {
    out: W,
}

impl<W: io::Write> WriterNotifier<W> {
    /// Create a notifier writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the notifier, returning the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Notifier for WriterNotifier<W> {
    fn notify(&mut self, notice: Notice) {
        let marker = match notice.level {
            NoticeLevel::Success => "\x1b[32m✓\x1b[0m",
            NoticeLevel::Error => "\x1b[31m✗\x1b[0m",
        };

        if let Err(error) = writeln!(self.out, "{marker} {}", notice.message) {
            warn!(%error, "failed to display notice");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use testresult::TestResult;

    use super::*;

    /// Shared buffer standing in for the log output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|error| io::Error::other(error.to_string()))?
                .extend_from_slice(buf);

            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn log_notifier_emits_events_by_level() -> TestResult {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut notifier = LogNotifier;

            notifier.notify(Notice::success("Added Pen to cart"));
            notifier.notify(Notice::error("Your cart is empty!"));
        });

        let bytes = captured.0.lock().map_err(|error| error.to_string())?.clone();
        let text = String::from_utf8(bytes)?;

        let added = text
            .lines()
            .find(|line| line.contains("Added Pen to cart"))
            .ok_or("success notice not logged")?;
        let empty = text
            .lines()
            .find(|line| line.contains("Your cart is empty!"))
            .ok_or("error notice not logged")?;

        assert!(added.contains("INFO"));
        assert!(empty.contains("WARN"));

        Ok(())
    }

    #[test]
    fn vec_records_notices_in_order() {
        let mut notices = Vec::new();

        notices.notify(Notice::success("Added Pen to cart"));
        notices.notify(Notice::error("Your cart is empty!"));

        assert_eq!(
            notices,
            vec![
                Notice::success("Added Pen to cart"),
                Notice::error("Your cart is empty!"),
            ]
        );
    }

    #[test]
    fn writer_notifier_writes_message_lines() -> TestResult {
        let mut notifier = WriterNotifier::new(Vec::new());

        notifier.notify(Notice::success("Added Pen to cart"));
        notifier.notify(Notice::error("Your cart is empty!"));

        let text = String::from_utf8(notifier.into_inner())?;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|line| line.ends_with("Added Pen to cart")));
        assert!(lines.get(1).is_some_and(|line| line.ends_with("Your cart is empty!")));

        Ok(())
    }
}
