use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Defers a job until a quiescence window passes with no newer submission.
///
/// Every submission bumps a generation counter and parks the job on a
/// timer thread; when the timer fires, the job only runs if its generation
/// is still current, so of any burst of submissions the last one wins.
/// Cancelling just bumps the generation and is a no-op when nothing is
/// pending or the pending job already fired.
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedule `job` to run after the quiescence window, superseding any
    /// previously submitted job that has not fired yet.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let window = self.window;
        thread::spawn(move || {
            thread::sleep(window);
            if generation.load(Ordering::SeqCst) == id {
                job();
            }
        });
    }

    /// Drop whatever is pending without scheduling anything new.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    const WINDOW: Duration = Duration::from_millis(40);
    // long enough for any pending timer to have fired
    const SETTLE: Duration = Duration::from_millis(250);

    #[test]
    fn only_the_last_submission_fires() {
        let debouncer = Debouncer::new(WINDOW);
        let hits = Arc::new(AtomicUsize::new(0));
        for add in 1..=3 {
            let hits = Arc::clone(&hits);
            debouncer.submit(move || {
                hits.fetch_add(add, Ordering::SeqCst);
            });
        }
        thread::sleep(SETTLE);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn cancel_drops_the_pending_job() {
        let debouncer = Debouncer::new(WINDOW);
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            debouncer.submit(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        debouncer.cancel();
        thread::sleep(SETTLE);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_is_idempotent_and_safe_when_idle() {
        let debouncer = Debouncer::new(WINDOW);
        debouncer.cancel();
        debouncer.cancel();
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let hits = Arc::clone(&hits);
            debouncer.submit(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }
        thread::sleep(SETTLE);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
