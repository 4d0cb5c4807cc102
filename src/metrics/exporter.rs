use crate::metrics::PolicyMetrics;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExporterType {
    Prometheus,
    Json,
    Logging,
}

pub struct MetricsExporter {
    metrics: Arc<PolicyMetrics>,
    exporter_type: ExporterType,
    enabled: bool,
}

impl MetricsExporter {
    pub fn new(metrics: Arc<PolicyMetrics>, exporter_type: ExporterType) -> Self {
        Self {
            metrics,
            exporter_type,
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn export_metrics(&self) -> Result<String, serde_json::Error> {
        if !self.enabled {
            return Ok("Metrics export disabled".to_string());
        }

        match self.exporter_type {
            ExporterType::Prometheus => Ok(self.export_prometheus()),
            ExporterType::Json => self.export_json(),
            ExporterType::Logging => Ok(self.export_logging()),
        }
    }

    fn sorted_hooks(&self) -> BTreeMap<String, u64> {
        self.metrics.get_hook_invocations().into_iter().collect()
    }

    fn export_prometheus(&self) -> String {
        let mut output = String::new();
        let counters = [
            ("rer_user_dates_evaluations_total", self.metrics.get_evaluations()),
            ("rer_user_dates_restricted_catalogs_total", self.metrics.get_restricted_catalogs()),
            ("rer_user_dates_admin_notices_total", self.metrics.get_admin_notices()),
            ("rer_user_dates_preference_rewrites_total", self.metrics.get_rewrites()),
            ("rer_user_dates_redirects_total", self.metrics.get_redirects()),
            ("rer_user_dates_rejected_anonymous_total", self.metrics.get_rejected_anonymous()),
        ];

        for (name, value) in counters {
            output.push_str(&format!("{} {}\n", name, value));
        }

        for (hook, count) in self.sorted_hooks() {
            output.push_str(&format!(
                "rer_user_dates_hook_invocations_total{{hook=\"{}\"}} {}\n",
                hook, count
            ));
        }

        output
    }

    fn export_json(&self) -> Result<String, serde_json::Error> {
        let metrics = serde_json::json!({
            "evaluations": self.metrics.get_evaluations(),
            "restricted_catalogs": self.metrics.get_restricted_catalogs(),
            "admin_notices": self.metrics.get_admin_notices(),
            "preferences": {
                "rewrites": self.metrics.get_rewrites(),
                "redirects": self.metrics.get_redirects(),
            },
            "rejected_anonymous": self.metrics.get_rejected_anonymous(),
            "hooks": self.sorted_hooks(),
            "uptime_seconds": self.metrics.get_uptime().as_secs_f64(),
        });

        serde_json::to_string_pretty(&metrics)
    }

    fn export_logging(&self) -> String {
        info!(
            evaluations = self.metrics.get_evaluations(),
            restricted_catalogs = self.metrics.get_restricted_catalogs(),
            admin_notices = self.metrics.get_admin_notices(),
            rewrites = self.metrics.get_rewrites(),
            redirects = self.metrics.get_redirects(),
            rejected_anonymous = self.metrics.get_rejected_anonymous(),
            hooks = ?self.sorted_hooks(),
            "Date policy metrics exported"
        );

        "Metrics logged".to_string()
    }
}
