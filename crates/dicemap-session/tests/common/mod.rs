//! Shared helpers for session integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Once};

use chrono::{DateTime, Utc};
use dicemap_catalog::{CatalogColumns, RegionCatalog};
use dicemap_core::clock::Clock;
use dicemap_test_support::{RowBuilder, fixed_clock};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A clock that follows tokio's (possibly paused) time, starting at the
/// shared fixed instant.
#[derive(Debug)]
pub struct TokioClock {
    origin: DateTime<Utc>,
    started: Instant,
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        self.origin + chrono::Duration::from_std(self.started.elapsed()).unwrap()
    }
}

/// Must be called inside the test runtime.
pub fn tokio_clock() -> Arc<dyn Clock> {
    Arc::new(TokioClock {
        origin: fixed_clock().0,
        started: Instant::now(),
    })
}

/// Alpha: round keys 3. Beta: 3, 5, 1. Gamma: no keys, no center.
pub fn sample_catalog() -> Arc<RegionCatalog> {
    let rows = vec![
        RowBuilder::named("Alpha")
            .square(100.0, 10.0)
            .center(100.5, 10.5)
            .round_key(1, "3")
            .build(),
        RowBuilder::named("Beta")
            .square(120.0, 20.0)
            .center(120.5, 20.5)
            .round_key(1, "3")
            .round_key(2, "5")
            .round_key(3, "1")
            .build(),
        RowBuilder::named("Gamma").square(130.0, 30.0).build(),
    ];
    Arc::new(RegionCatalog::from_rows(&rows, &CatalogColumns::default()))
}
