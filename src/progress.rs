//! Progress reporting utilities using indicatif.
//!
//! The engine reports progress through the [`ProgressCallback`] trait; the
//! CLI installs [`Progress`], which draws an indicatif bar on stderr. The
//! engine fires `on_progress` after every 100th successfully hashed file,
//! so implementors should expect coarse-grained updates.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// Callback for scan progress updates.
///
/// Implementations must be `Send + Sync`: the engine invokes callbacks
/// from hasher worker threads.
pub trait ProgressCallback: Send + Sync {
    /// Called once before hashing starts.
    ///
    /// `total` is the number of files enumerated by the walker.
    fn on_scan_start(&self, _total: usize) {}

    /// Called periodically during hashing.
    ///
    /// `processed` is the cumulative count of successfully hashed files;
    /// `total` is the enumeration count and is monotonically non-decreasing
    /// across calls.
    fn on_progress(&self, processed: usize, total: usize);

    /// Called once after hashing completes (or is interrupted).
    fn on_scan_end(&self) {}
}

/// Terminal progress reporter backed by indicatif.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// When `quiet` is true, nothing is ever drawn.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) hashing (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self, total: usize) {
        if self.quiet {
            return;
        }
        let pb = ProgressBar::new(total as u64);
        pb.set_style(Self::bar_style());
        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_progress(&self, processed: usize, total: usize) {
        if let Some(ref pb) = *self.bar.lock().unwrap() {
            pb.set_length(total as u64);
            pb.set_position(processed as u64);
        }
    }

    fn on_scan_end(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recorder {
        calls: AtomicUsize,
        last_processed: AtomicUsize,
        last_total: AtomicUsize,
    }

    impl ProgressCallback for Recorder {
        fn on_progress(&self, processed: usize, total: usize) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_processed.store(processed, Ordering::SeqCst);
            self.last_total.store(total, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_callback_records_updates() {
        let rec = Recorder {
            calls: AtomicUsize::new(0),
            last_processed: AtomicUsize::new(0),
            last_total: AtomicUsize::new(0),
        };

        rec.on_scan_start(500);
        rec.on_progress(100, 500);
        rec.on_progress(200, 500);
        rec.on_scan_end();

        assert_eq!(rec.calls.load(Ordering::SeqCst), 2);
        assert_eq!(rec.last_processed.load(Ordering::SeqCst), 200);
        assert_eq!(rec.last_total.load(Ordering::SeqCst), 500);
    }

    #[test]
    fn test_quiet_progress_draws_nothing() {
        let progress = Progress::new(true);
        progress.on_scan_start(10);
        assert!(progress.bar.lock().unwrap().is_none());

        // Must not panic without a bar
        progress.on_progress(5, 10);
        progress.on_scan_end();
    }

    #[test]
    fn test_progress_bar_lifecycle() {
        let progress = Progress::new(false);
        progress.on_scan_start(10);
        assert!(progress.bar.lock().unwrap().is_some());

        progress.on_progress(5, 10);
        progress.on_scan_end();
        assert!(progress.bar.lock().unwrap().is_none());
    }
}
