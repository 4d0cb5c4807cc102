use std::sync::Arc;

use rer_user_dates::host::{
    HookError, HostVersion, InMemoryHost, PluginApi, PluginHooks, PreferenceStore, ReportFlow,
    ReportView, Request, UserRecord, PREFERENCE_DEFAULT_REPORT, PREFERENCE_DEFAULT_REPORT_DATE,
};
use rer_user_dates::metrics::PolicyMetrics;
use rer_user_dates::policy::{NoticeLevel, DEFAULT_DATE_MESSAGE, PLUGIN_ID, PROFILES_SETTING, SUPERUSER_MESSAGE};

fn host(version: &str) -> Arc<InMemoryHost> {
    let host = InMemoryHost::new(HostVersion::parse(version).unwrap());
    host.add_user(UserRecord {
        login: "root".to_string(),
        superuser_access: true,
    });
    host.add_user(UserRecord {
        login: "analyst".to_string(),
        superuser_access: false,
    });
    host.add_translation("General_Today", "Today");
    host.add_translation(SUPERUSER_MESSAGE, "Restriction active for other users");
    Arc::new(host)
}

fn hooks(host: &Arc<InMemoryHost>) -> PluginHooks<InMemoryHost> {
    PluginHooks::new(Arc::clone(host), Arc::new(PolicyMetrics::new()))
}

fn store_dates(host: &InMemoryHost, login: &str, date: &str, report: &str) {
    host.set_user_preference(login, PREFERENCE_DEFAULT_REPORT_DATE, date);
    host.set_user_preference(login, PREFERENCE_DEFAULT_REPORT, report);
}

#[cfg(test)]
mod hooks_tests {
    use super::*;

    #[test]
    fn test_anonymous_requests_are_rejected() {
        let host = host("2.16.0");
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        for request in [Request::anonymous(), Request::for_user("anonymous")] {
            assert!(matches!(
                hooks.default_dates(&request, &mut dates),
                Err(HookError::AnonymousUser(_))
            ));
            assert!(hooks.user_settings(&request).is_err());
            assert!(hooks.report_view(&request, ReportView::CoreHome).is_err());
        }

        assert_eq!(dates, host.default_dates());
        assert_eq!(hooks.metrics().get_rejected_anonymous(), 6);
    }

    #[test]
    fn test_default_dates_restricted_for_regular_user() {
        let host = host("2.16.0");
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        hooks.default_dates(&Request::for_user("analyst"), &mut dates).unwrap();

        assert_eq!(dates.len(), 5);
        assert!(dates.is_restricted());
        assert_eq!(dates.label("today"), Some("Today"));
        assert_eq!(dates.label("yesterday"), Some("General_Yesterday"));
        assert_eq!(hooks.metrics().get_restricted_catalogs(), 1);
    }

    #[test]
    fn test_default_dates_untouched_for_admin() {
        let host = host("2.16.0");
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        hooks.default_dates(&Request::for_user("root"), &mut dates).unwrap();

        assert_eq!(dates, host.default_dates());
        assert!(dates.contains("previous30"));
    }

    #[test]
    fn test_unknown_login_gets_restricted_dates() {
        let host = host("2.16.0");
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        hooks.default_dates(&Request::for_user("ghost"), &mut dates).unwrap();
        assert!(dates.is_restricted());
    }

    #[test]
    fn test_disabled_setting_leaves_dates_unrestricted() {
        let host = host("2.16.0");
        host.store_setting(PLUGIN_ID, PROFILES_SETTING, false);
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        hooks.default_dates(&Request::for_user("analyst"), &mut dates).unwrap();
        assert_eq!(dates, host.default_dates());
    }

    #[test]
    fn test_old_host_ignores_stored_setting() {
        let host = host("2.3.0");
        host.store_setting(PLUGIN_ID, PROFILES_SETTING, false);
        let hooks = hooks(&host);
        let mut dates = host.default_dates();

        hooks.default_dates(&Request::for_user("analyst"), &mut dates).unwrap();
        assert!(dates.is_restricted());
    }

    #[test]
    fn test_user_settings_notifies_admin_only() {
        let host = host("2.16.0");
        let hooks = hooks(&host);

        assert!(!hooks.user_settings(&Request::for_user("analyst")).unwrap());
        assert!(host.notifications().is_empty());

        assert!(hooks.user_settings(&Request::for_user("root")).unwrap());
        let queued = host.notifications();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].notice.message_id, SUPERUSER_MESSAGE);
        assert_eq!(queued[0].notice.level, NoticeLevel::Info);
        assert_eq!(queued[0].message, "Restriction active for other users");
        assert_eq!(hooks.metrics().get_admin_notices(), 1);
    }

    #[test]
    fn test_user_settings_silent_when_disabled() {
        let host = host("2.16.0");
        host.store_setting(PLUGIN_ID, PROFILES_SETTING, false);
        let hooks = hooks(&host);

        assert!(!hooks.user_settings(&Request::for_user("root")).unwrap());
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_report_view_redirects_range_request() {
        let host = host("2.16.0");
        store_dates(&host, "analyst", "lastMonth", "MultiSites");
        let hooks = hooks(&host);

        let request = Request::for_user("analyst").with_period("range");
        let flow = hooks.report_view(&request, ReportView::CoreHome).unwrap();

        let ReportFlow::Redirected(redirect) = flow else {
            panic!("Expected redirect, got {:?}", flow);
        };
        assert_eq!(redirect.module, "MultiSites");
        assert_eq!(redirect.to_string(), "module=MultiSites&action=index&period=day&date=yesterday");
        assert_eq!(host.redirects(), vec![redirect]);

        assert_eq!(
            host.get_user_preference("analyst", PREFERENCE_DEFAULT_REPORT_DATE).as_deref(),
            Some("yesterday")
        );

        let queued = host.notifications();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].notice.message_id, DEFAULT_DATE_MESSAGE);
        assert_eq!(queued[0].notice.level, NoticeLevel::Warning);
        assert_eq!(queued[0].message, DEFAULT_DATE_MESSAGE);

        assert_eq!(hooks.metrics().get_rewrites(), 1);
        assert_eq!(hooks.metrics().get_redirects(), 1);
    }

    #[test]
    fn test_report_view_rewrites_without_redirect_for_day_request() {
        let host = host("2.16.0");
        store_dates(&host, "analyst", "previous30", "MultiSites");
        let hooks = hooks(&host);

        let request = Request::for_user("analyst").with_period("day");
        let flow = hooks.report_view(&request, ReportView::MultiSites).unwrap();

        assert_eq!(flow, ReportFlow::Render);
        assert!(host.redirects().is_empty());
        assert_eq!(
            host.get_user_preference("analyst", PREFERENCE_DEFAULT_REPORT_DATE).as_deref(),
            Some("yesterday")
        );
        assert_eq!(host.notifications().len(), 1);
    }

    #[test]
    fn test_report_view_second_visit_is_quiet() {
        let host = host("2.16.0");
        store_dates(&host, "analyst", "last7", "MultiSites");
        let hooks = hooks(&host);
        let request = Request::for_user("analyst").with_period("range");

        hooks.report_view(&request, ReportView::CoreHome).unwrap();
        host.clear_notifications();

        let flow = hooks.report_view(&request, ReportView::CoreHome).unwrap();
        assert_eq!(flow, ReportFlow::Render);
        assert!(host.notifications().is_empty());
        assert_eq!(host.redirects().len(), 1);
        assert_eq!(hooks.metrics().get_rewrites(), 1);
    }

    #[test]
    fn test_report_view_compliant_preference_untouched() {
        let host = host("2.16.0");
        store_dates(&host, "analyst", "yesterday", "MultiSites");
        let hooks = hooks(&host);

        let request = Request::for_user("analyst").with_period("range");
        assert_eq!(hooks.report_view(&request, ReportView::CoreHome).unwrap(), ReportFlow::Render);
        assert!(host.notifications().is_empty());
    }

    #[test]
    fn test_report_view_missing_default_report_falls_back() {
        let host = host("2.16.0");
        host.set_user_preference("analyst", PREFERENCE_DEFAULT_REPORT_DATE, "previous7");
        let hooks = hooks(&host);

        let request = Request::for_user("analyst").with_period("range");
        match hooks.report_view(&request, ReportView::CoreHome).unwrap() {
            ReportFlow::Redirected(redirect) => assert_eq!(redirect.module, "CoreHome"),
            other => panic!("Expected redirect, got {:?}", other),
        }
    }

    #[test]
    fn test_report_view_admin_keeps_relative_date() {
        let host = host("2.16.0");
        store_dates(&host, "root", "last30", "MultiSites");
        let hooks = hooks(&host);

        let request = Request::for_user("root").with_period("range");
        assert_eq!(hooks.report_view(&request, ReportView::CoreHome).unwrap(), ReportFlow::Render);
        assert_eq!(
            host.get_user_preference("root", PREFERENCE_DEFAULT_REPORT_DATE).as_deref(),
            Some("last30")
        );
    }

    #[test]
    fn test_report_view_without_period_param() {
        let host = host("2.16.0");
        store_dates(&host, "analyst", "last7", "MultiSites");
        let hooks = hooks(&host);

        let flow = hooks.report_view(&Request::for_user("analyst"), ReportView::CoreHome).unwrap();
        assert_eq!(flow, ReportFlow::Render);
        assert_eq!(
            host.get_user_preference("analyst", PREFERENCE_DEFAULT_REPORT_DATE).as_deref(),
            Some("yesterday")
        );
    }

    #[test]
    fn test_hook_invocations_are_counted_by_name() {
        let host = host("2.16.0");
        let hooks = hooks(&host);
        let request = Request::for_user("analyst");

        hooks.report_view(&request, ReportView::CoreHome).unwrap();
        hooks.report_view(&request, ReportView::MultiSites).unwrap();
        hooks.user_settings(&request).unwrap();

        let counts = hooks.metrics().get_hook_invocations();
        assert_eq!(counts.get("Controller.CoreHome.index"), Some(&1));
        assert_eq!(counts.get("Controller.MultiSites.index"), Some(&1));
        assert_eq!(counts.get("Controller.UsersManager.userSettings"), Some(&1));
        assert_eq!(hooks.metrics().get_evaluations(), 3);
    }

    #[test]
    fn test_api_settings_calendars() {
        let host = host("2.16.0");
        let api = PluginApi::new(Arc::clone(&host));

        assert!(!api.settings_calendars(&Request::anonymous()));
        assert!(api.settings_calendars(&Request::for_user("analyst")));

        host.store_setting(PLUGIN_ID, PROFILES_SETTING, false);
        assert!(!api.settings_calendars(&Request::for_user("analyst")));
    }

    #[test]
    fn test_api_host_version() {
        let host = host("2.4.0-rc1");
        let api = PluginApi::new(host);
        assert_eq!(api.host_version(), "2.4.0-rc1");
    }
}
