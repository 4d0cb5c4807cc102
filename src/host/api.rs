use crate::host::{Host, Request};
use crate::policy::PolicyEngine;
use std::sync::Arc;

/// Read API the plugin publishes to the host's front end.
pub struct PluginApi<H: Host> {
    host: Arc<H>,
    engine: PolicyEngine,
}

impl<H: Host> PluginApi<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            engine: PolicyEngine::new(),
        }
    }

    /// Whether date calendars are restricted; always `false` for anonymous visitors.
    pub fn settings_calendars(&self, request: &Request) -> bool {
        if request.authenticated_login().is_none() {
            return false;
        }
        self.engine.resolve_enabled(self.host.settings())
    }

    pub fn host_version(&self) -> String {
        self.host.version().to_string()
    }
}
