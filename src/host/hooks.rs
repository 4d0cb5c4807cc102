use crate::host::{
    Host, Request, PREFERENCE_DEFAULT_REPORT, PREFERENCE_DEFAULT_REPORT_DATE,
};
use crate::metrics::PolicyMetrics;
use crate::policy::{
    DateRangeCatalog, Notice, PolicyEngine, Redirect, StoredPreference, UserContext,
    SUPERUSER_MESSAGE,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Module a corrected user lands on when no default report is stored.
const FALLBACK_REPORT_MODULE: &str = "CoreHome";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HookError {
    #[error("hook '{0}' requires an authenticated user")]
    AnonymousUser(&'static str),
}

/// Report screens that check the stored default date before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    CoreHome,
    MultiSites,
}

impl ReportView {
    pub fn hook_name(&self) -> &'static str {
        match self {
            ReportView::CoreHome => "Controller.CoreHome.index",
            ReportView::MultiSites => "Controller.MultiSites.index",
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "flow", content = "redirect", rename_all = "snake_case")]
pub enum ReportFlow {
    Render,
    Redirected(Redirect),
}

/// Entry points the host calls at its lifecycle hooks.
pub struct PluginHooks<H: Host> {
    host: Arc<H>,
    engine: PolicyEngine,
    metrics: Arc<PolicyMetrics>,
}

impl<H: Host> PluginHooks<H> {
    pub const DEFAULT_DATES_HOOK: &'static str = "UsersManager.getDefaultDates";
    pub const USER_SETTINGS_HOOK: &'static str = "Controller.UsersManager.userSettings";

    pub fn new(host: Arc<H>, metrics: Arc<PolicyMetrics>) -> Self {
        Self {
            host,
            engine: PolicyEngine::new(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<PolicyMetrics> {
        &self.metrics
    }

    /// Replaces `dates` with the catalog this user may choose from.
    pub fn default_dates(
        &self,
        request: &Request,
        dates: &mut DateRangeCatalog,
    ) -> Result<(), HookError> {
        let user = self.resolve_user(request, Self::DEFAULT_DATES_HOOK)?;
        let enabled = self.engine.resolve_enabled(self.host.settings());
        let exempt = self.engine.is_exempt(&user);

        let catalog = self.engine.catalog_for(
            enabled,
            exempt,
            std::mem::take(dates),
            self.host.as_ref(),
        );

        if enabled && !exempt {
            self.metrics.record_restricted_catalog();
        }

        debug!("Offering {} date options to '{}'", catalog.len(), user.login);
        *dates = catalog;
        Ok(())
    }

    /// Tells administrators that the restriction is active for other users.
    pub fn user_settings(&self, request: &Request) -> Result<bool, HookError> {
        let user = self.resolve_user(request, Self::USER_SETTINGS_HOOK)?;
        let enabled = self.engine.resolve_enabled(self.host.settings());
        let exempt = self.engine.is_exempt(&user);

        if !self.engine.should_notify_admin(enabled, exempt) {
            return Ok(false);
        }

        self.send_notice(&Notice::info(SUPERUSER_MESSAGE));
        self.metrics.record_admin_notice();
        Ok(true)
    }

    /// Corrects a relative stored default date before a report renders.
    pub fn report_view(&self, request: &Request, view: ReportView) -> Result<ReportFlow, HookError> {
        let user = self.resolve_user(request, view.hook_name())?;
        let enabled = self.engine.resolve_enabled(self.host.settings());
        let exempt = self.engine.is_exempt(&user);

        if !enabled || exempt {
            return Ok(ReportFlow::Render);
        }

        let stored = StoredPreference {
            default_report_date: self
                .host
                .get_user_preference(&user.login, PREFERENCE_DEFAULT_REPORT_DATE)
                .unwrap_or_default(),
            default_report: self
                .host
                .get_user_preference(&user.login, PREFERENCE_DEFAULT_REPORT)
                .filter(|report| !report.is_empty())
                .unwrap_or_else(|| FALLBACK_REPORT_MODULE.to_string()),
            requested_period: request.period.clone().unwrap_or_default(),
        };

        let decision = self.engine.reconcile_stored_preference(enabled, exempt, &stored);

        if let Some(rewrite) = &decision.rewrite {
            self.host.set_user_preference(
                &user.login,
                PREFERENCE_DEFAULT_REPORT_DATE,
                &rewrite.new_date,
            );
            self.metrics.record_rewrite();
            info!(
                "Reset default report date of '{}' from '{}' to '{}'",
                user.login, stored.default_report_date, rewrite.new_date
            );
            self.send_notice(&rewrite.notice);
        }

        match decision.redirect {
            Some(redirect) => {
                info!("Redirecting '{}' away from custom range: {}", user.login, redirect);
                self.metrics.record_redirect();
                self.host.redirect_to(&redirect);
                Ok(ReportFlow::Redirected(redirect))
            }
            None => Ok(ReportFlow::Render),
        }
    }

    fn resolve_user(&self, request: &Request, hook: &'static str) -> Result<UserContext, HookError> {
        self.metrics.record_hook(hook);

        let Some(login) = request.authenticated_login() else {
            warn!("Rejected anonymous request at '{}'", hook);
            self.metrics.record_rejected_anonymous();
            return Err(HookError::AnonymousUser(hook));
        };

        Ok(UserContext::from_lookup(login, self.host.get_user(login)))
    }

    fn send_notice(&self, notice: &Notice) {
        let message = self
            .host
            .translate(&notice.message_id)
            .unwrap_or_else(|| notice.message_id.clone());
        self.host.notify(notice, &message);
    }
}
