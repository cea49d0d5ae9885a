//! Shared utilities for the worker-host integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use worker_host::application::{ApplicationHost, ManagerError};
use worker_host::config::schema::{ApplicationConfig, HostConfig};

/// Application-manager double recording every call made to it.
pub struct RecordingHost {
    delay: Mutex<Duration>,
    shutdown_duration: Duration,
    fail_shutdown: bool,
    started: AtomicUsize,
    completed: AtomicUsize,
    started_at: Mutex<Option<Instant>>,
    applied: Mutex<Vec<HostConfig>>,
    recycled: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingHost {
    pub fn new(delay: Duration) -> Arc<Self> {
        Self::build(delay, Duration::ZERO, false)
    }

    /// Like [`RecordingHost::new`], but `shut_down` takes `shutdown_duration`
    /// of wall-clock time to complete.
    pub fn with_shutdown_duration(delay: Duration, shutdown_duration: Duration) -> Arc<Self> {
        Self::build(delay, shutdown_duration, false)
    }

    /// Like [`RecordingHost::new`], but every `shut_down` call fails.
    pub fn failing(delay: Duration) -> Arc<Self> {
        Self::build(delay, Duration::ZERO, true)
    }

    fn build(delay: Duration, shutdown_duration: Duration, fail_shutdown: bool) -> Arc<Self> {
        Arc::new(Self {
            delay: Mutex::new(delay),
            shutdown_duration,
            fail_shutdown,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            started_at: Mutex::new(None),
            applied: Mutex::new(Vec::new()),
            recycled: Mutex::new(Vec::new()),
        })
    }

    /// Number of `shut_down` invocations that have begun.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of `shut_down` invocations that have finished.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Instant the first `shut_down` began, if any has.
    pub fn started_at(&self) -> Option<Instant> {
        *self.started_at.lock().unwrap()
    }

    /// Configurations applied through `apply_config`, oldest first.
    pub fn applied(&self) -> Vec<HostConfig> {
        self.applied.lock().unwrap().clone()
    }

    /// Paths recycled through `recycle_applications`, oldest first.
    pub fn recycled(&self) -> Vec<String> {
        self.recycled.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApplicationHost for RecordingHost {
    fn shutdown_delay(&self) -> Duration {
        *self.delay.lock().unwrap()
    }

    async fn shut_down(&self) -> Result<(), ManagerError> {
        self.started_at
            .lock()
            .unwrap()
            .get_or_insert_with(Instant::now);
        self.started.fetch_add(1, Ordering::SeqCst);

        if !self.shutdown_duration.is_zero() {
            tokio::time::sleep(self.shutdown_duration).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail_shutdown {
            Err(ManagerError::DrainTimeout {
                name: "orders".to_string(),
                remaining: 2,
            })
        } else {
            Ok(())
        }
    }

    fn apply_config(&self, config: HostConfig) {
        *self.delay.lock().unwrap() = config.module.shutdown_delay();
        self.applied.lock().unwrap().push(config);
    }

    async fn recycle_applications(&self, path: &str) -> usize {
        self.recycled.lock().unwrap().push(path.to_string());
        0
    }
}

/// Build a host configuration with the given delay and applications.
#[allow(dead_code)]
pub fn host_config(shutdown_delay_ms: u64, apps: &[(&str, &str)]) -> HostConfig {
    let mut config = HostConfig::default();
    config.module.shutdown_delay_ms = shutdown_delay_ms;
    config.applications = apps
        .iter()
        .map(|(name, path)| ApplicationConfig {
            name: name.to_string(),
            path: path.to_string(),
        })
        .collect();
    config
}
