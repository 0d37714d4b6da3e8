//! Mutex-guarded shared boolean and a measured reader/writer exercise.
//!
//! [`SharedFlag`] is a clone-able handle to one lock-guarded bool: one writer
//! and any number of readers. There is no ordering guarantee between readers
//! and no cancellation; [`run_flag_exercise`] simply spawns the threads,
//! joins them all, and reports what each reader observed.

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Clone-able handle to a mutex-guarded boolean.
#[derive(Clone, Debug, Default)]
pub struct SharedFlag {
    inner: Arc<Mutex<bool>>,
}

impl SharedFlag {
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Read the current value.
    pub fn get(&self) -> bool {
        *self.inner.lock()
    }

    /// Overwrite the value.
    pub fn set(&self, value: bool) {
        *self.inner.lock() = value;
    }

    /// Flip the value under a single lock acquisition and return the new
    /// value. Atomic with respect to concurrent `get`/`set`.
    pub fn toggle(&self) -> bool {
        let mut guard = self.inner.lock();
        *guard = !*guard;
        *guard
    }
}

/// Knobs for [`run_flag_exercise`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FlagExerciseOptions {
    /// Number of reader threads.
    pub readers: usize,
    /// Samples taken by each reader.
    pub reads_per_reader: usize,
    /// Number of toggles performed by the single writer.
    pub writer_toggles: usize,
    /// Pause before each read, in milliseconds.
    pub read_interval_ms: u64,
    /// Pause before each toggle, in milliseconds.
    pub write_interval_ms: u64,
}

impl Default for FlagExerciseOptions {
    fn default() -> Self {
        Self {
            readers: 3,
            reads_per_reader: 100,
            writer_toggles: 50,
            read_interval_ms: 1,
            write_interval_ms: 1,
        }
    }
}

/// What a single reader observed.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderStats {
    pub true_count: usize,
    pub false_count: usize,
}

/// Aggregated outcome of one exercise run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagExerciseReport {
    pub readers: Vec<ReaderStats>,
    pub writer_toggles: usize,
    pub final_value: bool,
    pub elapsed_ms: f64,
}

/// Spawn one writer toggling the flag and `readers` readers sampling it,
/// join everything, and aggregate the observations.
pub fn run_flag_exercise(options: &FlagExerciseOptions) -> Result<FlagExerciseReport, String> {
    let flag = SharedFlag::new(false);
    let start = Instant::now();

    let writer = {
        let flag = flag.clone();
        let toggles = options.writer_toggles;
        let interval = Duration::from_millis(options.write_interval_ms);
        thread::spawn(move || {
            for _ in 0..toggles {
                if !interval.is_zero() {
                    thread::sleep(interval);
                }
                flag.toggle();
            }
        })
    };

    let reader_handles: Vec<_> = (0..options.readers)
        .map(|_| {
            let flag = flag.clone();
            let reads = options.reads_per_reader;
            let interval = Duration::from_millis(options.read_interval_ms);
            thread::spawn(move || {
                let mut stats = ReaderStats::default();
                for _ in 0..reads {
                    if !interval.is_zero() {
                        thread::sleep(interval);
                    }
                    if flag.get() {
                        stats.true_count += 1;
                    } else {
                        stats.false_count += 1;
                    }
                }
                stats
            })
        })
        .collect();

    let mut readers = Vec::with_capacity(reader_handles.len());
    for handle in reader_handles {
        let stats = handle
            .join()
            .map_err(|_| "reader thread panicked".to_string())?;
        readers.push(stats);
    }
    writer
        .join()
        .map_err(|_| "writer thread panicked".to_string())?;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "flag exercise: {} readers x {} reads, {} toggles, {:.1} ms",
        options.readers, options.reads_per_reader, options.writer_toggles, elapsed_ms
    );

    Ok(FlagExerciseReport {
        readers,
        writer_toggles: options.writer_toggles,
        final_value: flag.get(),
        elapsed_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_parity() {
        let flag = SharedFlag::new(false);
        for _ in 0..3 {
            flag.toggle();
        }
        assert!(flag.get(), "odd toggles flip the flag");
        flag.toggle();
        assert!(!flag.get(), "even toggles restore it");
    }

    #[test]
    fn clones_share_state() {
        let a = SharedFlag::new(false);
        let b = a.clone();
        a.set(true);
        assert!(b.get());
        assert!(!b.toggle());
        assert!(!a.get());
    }

    #[test]
    fn concurrent_toggles_preserve_parity() {
        let flag = SharedFlag::new(false);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let flag = flag.clone();
                thread::spawn(move || {
                    for _ in 0..1001 {
                        flag.toggle();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("toggle thread");
        }
        // 4 * 1001 toggles is an even total.
        assert!(!flag.get());
    }

    #[test]
    fn exercise_accounts_for_every_read() {
        let options = FlagExerciseOptions {
            readers: 4,
            reads_per_reader: 200,
            writer_toggles: 21,
            read_interval_ms: 0,
            write_interval_ms: 0,
        };
        let report = run_flag_exercise(&options).expect("exercise should succeed");
        assert_eq!(report.readers.len(), 4);
        for stats in &report.readers {
            assert_eq!(stats.true_count + stats.false_count, 200);
        }
        assert_eq!(report.writer_toggles, 21);
        // 21 toggles from false ends on true.
        assert!(report.final_value);
    }
}
