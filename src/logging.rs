//! Subscriber setup for the command-line tool.
//!
//! The subscriber has to exist before settings are loaded, but the level it
//! should use comes from `LOG_LEVEL`. It is installed at INFO with a reloadable
//! filter and re-levelled once settings are known. `RUST_LOG` always wins.

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, reload};

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter from `RUST_LOG`-style directives, falling back to `default_level`.
pub fn env_filter(default_level: Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Installs the global subscriber, writing to stderr.
pub fn init() -> FilterHandle {
    let (filter, handle) = reload::Layer::new(env_filter(Level::INFO, rust_log().as_deref()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();

    handle
}

pub fn set_default_level(handle: &FilterHandle, level: Level) -> Result<(), reload::Error> {
    handle.reload(env_filter(level, rust_log().as_deref()))
}

fn rust_log() -> Option<String> {
    std::env::var(EnvFilter::DEFAULT_ENV).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;

    // Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_filter_uses_default_level_without_directives() {
        let filter = env_filter(Level::WARN, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_directives_override_default_level() {
        let filter = env_filter(Level::WARN, Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_loading_records_reach_an_installed_subscriber() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_env_filter(env_filter(Level::DEBUG, None))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            Settings::from_source(&HashMap::<String, String>::new(), "/srv/trader").unwrap();
        });

        let output = logs.contents();
        assert!(output.contains("Configuration loaded"), "{output}");
        assert!(output.contains("IBKR_HOST"), "{output}");
    }

    #[test]
    fn test_info_level_hides_defaulted_variables() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_env_filter(env_filter(Level::INFO, None))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            Settings::from_source(&HashMap::<String, String>::new(), "/srv/trader").unwrap();
        });

        let output = logs.contents();
        assert!(output.contains("Configuration loaded"));
        assert!(!output.contains("using default"));
    }
}
