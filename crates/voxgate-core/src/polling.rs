//! Bounded polling of asynchronous vendor jobs

use crate::{Error, Result};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Async sleep abstraction so polling can run without wall-clock delays in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Attempt budget and spacing for one job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

/// Observed state of a remote job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus<T> {
    Pending,
    Completed(T),
    Failed(String),
}

/// Drives a status check until the job leaves `Pending` or the budget runs out.
#[derive(Clone)]
pub struct JobPoller {
    policy: PollPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl JobPoller {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Poll `check` (called with the 1-based attempt number).
    ///
    /// A check error is retried under the same budget, except on the final
    /// attempt where it is returned as is. `Failed` ends polling immediately.
    pub async fn run<T, F, Fut>(&self, provider: &str, job_id: &str, mut check: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<JobStatus<T>>>,
    {
        let max = self.policy.max_attempts;

        for attempt in 1..=max {
            match check(attempt).await {
                Ok(JobStatus::Completed(value)) => {
                    tracing::debug!(provider, job_id, attempt, "Job completed");
                    return Ok(value);
                }
                Ok(JobStatus::Failed(message)) => {
                    tracing::warn!(provider, job_id, attempt, %message, "Job failed");
                    return Err(Error::UpstreamJobFailed {
                        provider: provider.to_string(),
                        job_id: job_id.to_string(),
                        message,
                    });
                }
                Ok(JobStatus::Pending) => {
                    tracing::debug!(provider, job_id, attempt, max, "Job pending");
                }
                Err(err) if attempt == max => return Err(err),
                Err(err) => {
                    tracing::warn!(provider, job_id, attempt, error = %err, "Job status check failed, retrying");
                }
            }

            if attempt < max {
                self.sleeper.sleep(self.policy.interval).await;
            }
        }

        Err(Error::UpstreamJobTimeout {
            provider: provider.to_string(),
            job_id: job_id.to_string(),
            attempts: max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct CountingSleeper {
        sleeps: AtomicU32,
    }

    #[async_trait]
    impl Sleeper for CountingSleeper {
        async fn sleep(&self, _duration: Duration) {
            self.sleeps.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn poller(max_attempts: u32) -> (JobPoller, Arc<CountingSleeper>) {
        let sleeper = Arc::new(CountingSleeper::default());
        let poller = JobPoller::new(PollPolicy::new(max_attempts, Duration::from_secs(3)))
            .with_sleeper(sleeper.clone());
        (poller, sleeper)
    }

    #[tokio::test]
    async fn test_completes_after_pending_checks() {
        let (poller, sleeper) = poller(10);
        let calls = AtomicU32::new(0);

        let result = poller
            .run("Hamsa", "job-1", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt <= 3 {
                        Ok(JobStatus::Pending)
                    } else {
                        Ok(JobStatus::Completed("done".to_string()))
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(sleeper.sleeps.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_times_out_after_max_checks() {
        let (poller, sleeper) = poller(5);
        let calls = AtomicU32::new(0);

        let err = poller
            .run::<(), _, _>("Hamsa", "job-2", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(JobStatus::Pending) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UpstreamJobTimeout { attempts: 5, .. }));
        assert!(err.is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        // No sleep after the final attempt
        assert_eq!(sleeper.sleeps.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failed_is_terminal() {
        let (poller, sleeper) = poller(60);
        let calls = AtomicU32::new(0);

        let err = poller
            .run::<(), _, _>("Hamsa", "job-3", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(JobStatus::Failed("audio unreadable".to_string())) }
            })
            .await
            .unwrap_err();

        match err {
            Error::UpstreamJobFailed {
                job_id, message, ..
            } => {
                assert_eq!(job_id, "job-3");
                assert_eq!(message, "audio unreadable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sleeper.sleeps.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let (poller, _) = poller(3);

        let result = poller
            .run("Hamsa", "job-4", |attempt| async move {
                if attempt == 1 {
                    Err(Error::provider("Hamsa", "connection reset"))
                } else {
                    Ok(JobStatus::Completed(attempt))
                }
            })
            .await
            .unwrap();
        assert_eq!(result, 2);
    }

    #[tokio::test]
    async fn test_error_on_final_attempt_is_surfaced() {
        let (poller, _) = poller(2);

        let err = poller
            .run::<(), _, _>("Hamsa", "job-5", |_| async {
                Err(Error::provider("Hamsa", "bad gateway"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Provider { ref message, .. } if message == "bad gateway"));
    }
}
