// Tracing setup for binaries and tests that use this crate

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

//-----------------------------------------------------------------------------
// Tracing Initialization
//-----------------------------------------------------------------------------

/// Installs a global tracing subscriber that writes to stdout.
///
/// # Arguments
///
/// * `log_level`: filter directives used when `RUST_LOG` is not set.
///                Defaults to "info". Examples: "debug", "errata=trace,info".
/// * `json_output`: emit JSON lines instead of the human-readable format.
///                  Defaults to `false`.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(log_level: Option<&str>, json_output: Option<bool>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.unwrap_or("info")))?;

    let subscriber = build_subscriber(env_filter, json_output.unwrap_or(false), std::io::stdout);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// The subscriber behind [`init_tracing`], writing to `writer`.
///
/// Useful for scoping a subscriber with `tracing::subscriber::with_default`
/// or for sending events somewhere other than stdout.
pub fn build_subscriber<W>(
    env_filter: EnvFilter,
    json_output: bool,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = Registry::default().with(env_filter);

    if json_output {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer);
        Box::new(subscriber.with(json_layer))
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(writer);
        Box::new(subscriber.with(fmt_layer))
    }
}

//-----------------------------------------------------------------------------
// Tests
//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, SystemError};
    use serde_json::Value;
    use std::io;
    use std::sync::{Arc, Mutex, Once};

    static INIT: Once = Once::new();

    fn ensure_test_tracing() {
        INIT.call_once(|| {
            let _ = init_tracing(Some("errata=debug"), None);
        });
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(json_output: bool, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = build_subscriber(EnvFilter::new("errata=debug"), json_output, move || {
            writer.clone()
        });
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_raised_errors_are_logged() {
        let output = capture(false, || {
            let error = SystemError::new(ErrorKind::Timeout, None).raised();
            assert_eq!(error.message(), "Operation timed out.");
        });
        assert!(output.contains("DEBUG"));
        assert!(output.contains("raising error: Operation timed out."));
        assert!(output.contains("TimeoutError"));
    }

    #[test]
    fn test_json_output_is_one_object_per_event() {
        let output = capture(true, || {
            SystemError::new(ErrorKind::Format, Some("bad header")).raised();
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let event: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["level"], "DEBUG");
        assert_eq!(event["fields"]["message"], "raising error: bad header");
        assert_eq!(event["fields"]["name"], "FormatError");
    }

    #[test]
    fn test_filter_drops_events_below_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = build_subscriber(EnvFilter::new("errata=info"), false, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            SystemError::new(ErrorKind::Timeout, None).raised();
        });
        assert!(captured.text().is_empty());
    }

    #[test]
    fn test_second_init_fails() {
        ensure_test_tracing();
        assert!(init_tracing(None, Some(true)).is_err());
    }
}
