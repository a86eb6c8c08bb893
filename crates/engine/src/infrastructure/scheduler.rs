//! Scheduler implementations.

use std::sync::Mutex;
use std::time::Duration;

use crate::infrastructure::ports::{ScheduledJob, Scheduler};

/// Spawns each job on the tokio runtime after its delay.
///
/// Must be used from within a runtime.
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Scheduler bound to the runtime of the calling task.
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, job: ScheduledJob, delay: Duration) {
        tracing::debug!(
            job = job.name(),
            actor_id = %job.actor_id(),
            delay_ms = delay.as_millis() as u64,
            "Scheduling job"
        );
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            job.run().await;
        });
    }
}

/// Holds jobs until told to run them. Lets callers step through delayed work
/// deterministically.
#[derive(Default)]
pub struct ManualScheduler {
    jobs: Mutex<Vec<(ScheduledJob, Duration)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or(0)
    }

    /// Delays of the pending jobs, in submission order.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.jobs
            .lock()
            .map(|jobs| jobs.iter().map(|(_, delay)| *delay).collect())
            .unwrap_or_default()
    }

    /// Runs every pending job once, in submission order. Jobs scheduled while
    /// running are left for the next call.
    pub async fn run_pending(&self) -> usize {
        let jobs = match self.jobs.lock() {
            Ok(mut jobs) => std::mem::take(&mut *jobs),
            Err(_) => return 0,
        };
        let count = jobs.len();
        for (job, _) in jobs {
            job.run().await;
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, job: ScheduledJob, delay: Duration) {
        if let Ok(mut jobs) = self.jobs.lock() {
            jobs.push((job, delay));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homestead_domain::ObjectId;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_job(counter: &Arc<AtomicUsize>) -> ScheduledJob {
        let counter = Arc::clone(counter);
        ScheduledJob::new("count", ObjectId::new(), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test]
    async fn manual_scheduler_runs_each_job_once() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = ManualScheduler::new();
        scheduler.schedule(counting_job(&counter), Duration::from_millis(3000));
        scheduler.schedule(counting_job(&counter), Duration::from_millis(100));

        assert_eq!(
            scheduler.pending_delays(),
            vec![Duration::from_millis(3000), Duration::from_millis(100)]
        );
        assert_eq!(scheduler.run_pending().await, 2);
        assert_eq!(scheduler.run_pending().await, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current();
        scheduler.schedule(counting_job(&counter), Duration::from_secs(3));

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
