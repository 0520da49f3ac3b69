use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::common::constants::{FORECAST_FILE, HISTORICAL_FILE, REFRESH_INTERVAL};
use crate::common::model::{ForecastPoint, HistoricalReading};

pub mod read;
pub mod write;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Both tables as read at one point in time. An empty table means the file
/// was missing or couldn't be parsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub historical: Vec<HistoricalReading>,
    pub forecast: Vec<ForecastPoint>,
}

struct CachedSnapshot {
    snapshot: Arc<Snapshot>,
    loaded_at: Instant,
}

pub struct DataStore {
    data_dir: PathBuf,
    refresh_interval: Duration,
    clock: Box<dyn Clock>,
    cached: Option<CachedSnapshot>,
}

impl DataStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self::with_clock(data_dir, REFRESH_INTERVAL, Box::new(SystemClock))
    }

    pub fn with_clock(data_dir: PathBuf, refresh_interval: Duration, clock: Box<dyn Clock>) -> Self {
        DataStore {
            data_dir,
            refresh_interval,
            clock,
            cached: None,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn historical_path(&self) -> PathBuf {
        self.data_dir.join(HISTORICAL_FILE)
    }

    pub fn forecast_path(&self) -> PathBuf {
        self.data_dir.join(FORECAST_FILE)
    }

    /// Returns the cached snapshot while it is younger than the refresh
    /// interval, otherwise re-reads both files.
    pub fn load(&mut self) -> Arc<Snapshot> {
        let now = self.clock.now();

        if let Some(cached) = &self.cached {
            if now.saturating_duration_since(cached.loaded_at) < self.refresh_interval {
                return cached.snapshot.clone();
            }
        }

        let snapshot = Arc::new(Snapshot {
            historical: load_or_empty(&self.historical_path(), read::read_historical),
            forecast: load_or_empty(&self.forecast_path(), read::read_forecast),
        });

        debug!(
            "Loaded {} historical rows and {} forecast rows from {}",
            snapshot.historical.len(),
            snapshot.forecast.len(),
            self.data_dir.to_string_lossy()
        );

        self.cached = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            loaded_at: now,
        });

        snapshot
    }
}

fn load_or_empty<T>(path: &Path, read: fn(&Path) -> anyhow::Result<Vec<T>>) -> Vec<T> {
    match read(path) {
        Ok(rows) => rows,
        Err(err) => {
            warn!("Treating {} as empty: {:#}", path.to_string_lossy(), err);
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    #[derive(Clone)]
    struct ManualClock(Arc<Mutex<Instant>>);

    impl ManualClock {
        fn new() -> Self {
            ManualClock(Arc::new(Mutex::new(Instant::now())))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.0.lock().unwrap()
        }
    }

    fn store_with_clock(dir: &Path) -> (DataStore, ManualClock) {
        let clock = ManualClock::new();
        let store = DataStore::with_clock(
            dir.to_path_buf(),
            REFRESH_INTERVAL,
            Box::new(clock.clone()),
        );
        (store, clock)
    }

    fn write_history(dir: &Path, body: &str) {
        fs::write(
            dir.join(HISTORICAL_FILE),
            format!("Timestamp,Acceleration RMS (g)\n{}", body),
        )
        .unwrap();
    }

    #[test]
    fn missing_files_load_as_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DataStore::new(dir.path().to_path_buf());

        let snapshot = store.load();

        assert!(snapshot.historical.is_empty());
        assert!(snapshot.forecast.is_empty());
    }

    #[test]
    fn malformed_forecast_does_not_affect_history() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "2024-01-01T00:00,0.01\n");
        fs::write(dir.path().join(FORECAST_FILE), "ds,yhat\nnonsense,abc\n").unwrap();
        let mut store = DataStore::new(dir.path().to_path_buf());

        let snapshot = store.load();

        assert_eq!(snapshot.historical.len(), 1);
        assert!(snapshot.forecast.is_empty());
    }

    #[test]
    fn serves_cached_snapshot_inside_refresh_interval() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "2024-01-01T00:00,0.01\n");
        let (mut store, clock) = store_with_clock(dir.path());

        let first = store.load();
        write_history(dir.path(), "2024-01-01T00:00,0.01\n2024-01-01T01:00,0.05\n");
        clock.advance(Duration::from_secs(59));
        let second = store.load();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.historical.len(), 1);
    }

    #[test]
    fn reloads_after_refresh_interval() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "2024-01-01T00:00,0.01\n");
        let (mut store, clock) = store_with_clock(dir.path());

        store.load();
        write_history(dir.path(), "2024-01-02T00:00,0.07\n2024-01-02T01:00,0.08\n");
        clock.advance(REFRESH_INTERVAL);
        let reloaded = store.load();

        assert_eq!(reloaded.historical.len(), 2);
        assert_eq!(reloaded.historical[0].acceleration_rms, 0.07);
    }

    #[test]
    fn overwritten_history_replaces_old_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_history(dir.path(), "2024-01-01T00:00,0.01\n2024-01-01T01:00,0.02\n");
        let (mut store, clock) = store_with_clock(dir.path());
        assert_eq!(store.load().historical.len(), 2);

        write::overwrite_file(
            &store.historical_path(),
            b"Timestamp,Acceleration RMS (g)\n2024-02-01T00:00,0.09\n",
        )
        .unwrap();
        clock.advance(REFRESH_INTERVAL);
        let snapshot = store.load();

        assert_eq!(snapshot.historical.len(), 1);
        assert_eq!(snapshot.historical[0].acceleration_rms, 0.09);
    }
}
