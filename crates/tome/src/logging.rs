//! Tracing setup and warning accounting for strict mode.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Shared count of warnings emitted since startup.
#[derive(Clone, Debug, Default)]
pub(crate) struct WarningCount(Arc<AtomicUsize>);

impl WarningCount {
    /// Warnings and errors seen so far.
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

/// Layer that counts `WARN` and `ERROR` events, whatever the display filter.
struct CountingLayer(WarningCount);

impl<S: Subscriber> Layer<S> for CountingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            (self.0).0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Install the global subscriber and return the warning counter.
///
/// Output is filtered by `RUST_LOG` (default `warn`), or `info` when verbose.
/// Counting ignores that filter, so `--strict` works with any log level.
pub(crate) fn init(verbose: bool) -> WarningCount {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    let count = WarningCount::default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .with(CountingLayer(count.clone()).with_filter(LevelFilter::WARN))
        .init();

    count
}
