pub mod exporter;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use exporter::{ExporterType, MetricsExporter};

#[derive(Debug, Clone)]
pub struct PolicyMetrics {
    evaluations: Arc<AtomicU64>,
    restricted_catalogs: Arc<AtomicU64>,
    admin_notices: Arc<AtomicU64>,
    rewrites: Arc<AtomicU64>,
    redirects: Arc<AtomicU64>,
    rejected_anonymous: Arc<AtomicU64>,
    hook_invocations: Arc<RwLock<HashMap<String, u64>>>,
    start_time: Instant,
}

impl PolicyMetrics {
    pub fn new() -> Self {
        Self {
            evaluations: Arc::new(AtomicU64::new(0)),
            restricted_catalogs: Arc::new(AtomicU64::new(0)),
            admin_notices: Arc::new(AtomicU64::new(0)),
            rewrites: Arc::new(AtomicU64::new(0)),
            redirects: Arc::new(AtomicU64::new(0)),
            rejected_anonymous: Arc::new(AtomicU64::new(0)),
            hook_invocations: Arc::new(RwLock::new(HashMap::new())),
            start_time: Instant::now(),
        }
    }

    pub fn record_hook(&self, hook: &str) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        *self.hook_invocations.write().entry(hook.to_string()).or_insert(0) += 1;
    }

    pub fn record_restricted_catalog(&self) {
        self.restricted_catalogs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_admin_notice(&self) {
        self.admin_notices.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rewrite(&self) {
        self.rewrites.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_anonymous(&self) {
        self.rejected_anonymous.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn get_restricted_catalogs(&self) -> u64 {
        self.restricted_catalogs.load(Ordering::Relaxed)
    }

    pub fn get_admin_notices(&self) -> u64 {
        self.admin_notices.load(Ordering::Relaxed)
    }

    pub fn get_rewrites(&self) -> u64 {
        self.rewrites.load(Ordering::Relaxed)
    }

    pub fn get_redirects(&self) -> u64 {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn get_rejected_anonymous(&self) -> u64 {
        self.rejected_anonymous.load(Ordering::Relaxed)
    }

    pub fn get_hook_invocations(&self) -> HashMap<String, u64> {
        self.hook_invocations.read().clone()
    }

    pub fn get_uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for PolicyMetrics {
    fn default() -> Self {
        Self::new()
    }
}
