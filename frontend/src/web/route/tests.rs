use super::*;

// =========================================================
// 路径解析测试
// =========================================================

#[test]
fn test_from_path_matches_known_routes() {
    assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
    assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
    assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
    assert_eq!(AppRoute::from_path("/dashboard/students"), AppRoute::Students);
    assert_eq!(
        AppRoute::from_path("/dashboard/students/add"),
        AppRoute::StudentAdd
    );
    assert_eq!(AppRoute::from_path("/dashboard/courses"), AppRoute::Courses);
    assert_eq!(AppRoute::from_path("/dashboard/reports"), AppRoute::Reports);
    assert_eq!(AppRoute::from_path("/dashboard/settings"), AppRoute::Settings);
}

#[test]
fn test_from_path_parses_edit_id() {
    assert_eq!(
        AppRoute::from_path("/dashboard/students/edit/65f1"),
        AppRoute::StudentEdit("65f1".to_string())
    );
    // 缺失或非法的 id 落入 404
    assert_eq!(
        AppRoute::from_path("/dashboard/students/edit/"),
        AppRoute::NotFound
    );
    assert_eq!(
        AppRoute::from_path("/dashboard/students/edit/a/b"),
        AppRoute::NotFound
    );
}

#[test]
fn test_from_path_ignores_query_and_trailing_slash() {
    assert_eq!(
        AppRoute::from_path("/login?from=%2Fdashboard"),
        AppRoute::Login
    );
    assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
}

#[test]
fn test_unknown_path_is_not_found() {
    assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    assert_eq!(AppRoute::from_path("/dashboard2"), AppRoute::NotFound);
}

#[test]
fn test_path_round_trip() {
    let routes = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::Dashboard,
        AppRoute::Students,
        AppRoute::StudentAdd,
        AppRoute::StudentEdit("42".to_string()),
        AppRoute::Courses,
        AppRoute::Reports,
        AppRoute::Settings,
    ];

    for route in routes {
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
    }
}

// =========================================================
// 守卫属性测试
// =========================================================

#[test]
fn test_public_routes_never_require_auth() {
    for route in [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::NotFound,
    ] {
        assert!(!route.requires_auth(), "{} 不应要求认证", route);
    }
}

#[test]
fn test_dashboard_prefix_requires_auth() {
    for route in [
        AppRoute::Dashboard,
        AppRoute::Students,
        AppRoute::StudentAdd,
        AppRoute::StudentEdit("42".to_string()),
        AppRoute::Courses,
        AppRoute::Reports,
        AppRoute::Settings,
    ] {
        assert!(route.requires_auth(), "{} 应要求认证", route);
    }
}

#[test]
fn test_public_route_is_always_public() {
    // 无论会话处于何种状态，公共页面都直接渲染
    for gate in [
        SessionGate { is_loading: true, is_authenticated: false },
        SessionGate { is_loading: false, is_authenticated: false },
        SessionGate { is_loading: false, is_authenticated: true },
    ] {
        assert_eq!(guard_route(&AppRoute::Login, gate), GuardVerdict::Public);
    }
}

#[test]
fn test_protected_route_waits_while_session_restores() {
    let gate = SessionGate {
        is_loading: true,
        is_authenticated: false,
    };

    assert_eq!(
        guard_route(&AppRoute::Students, gate),
        GuardVerdict::Checking
    );
}

#[test]
fn test_protected_route_renders_when_authenticated() {
    let gate = SessionGate {
        is_loading: false,
        is_authenticated: true,
    };

    assert_eq!(
        guard_route(&AppRoute::Students, gate),
        GuardVerdict::Decided(GuardDecision::Render)
    );
}

#[test]
fn test_protected_route_redirects_anonymous_with_origin() {
    let gate = SessionGate {
        is_loading: false,
        is_authenticated: false,
    };

    assert_eq!(
        guard_route(&AppRoute::Students, gate),
        GuardVerdict::Decided(GuardDecision::RedirectToLogin {
            from: "/dashboard/students".to_string()
        })
    );
}

// =========================================================
// 回跳参数测试
// =========================================================

#[test]
fn test_login_path_encodes_origin() {
    assert_eq!(
        login_path_with_from("/dashboard/students"),
        "/login?from=%2Fdashboard%2Fstudents"
    );
}

#[test]
fn test_default_landing_omits_from_param() {
    assert_eq!(login_path_with_from("/dashboard"), "/login");
    assert_eq!(login_path_with_from(""), "/login");
}

#[test]
fn test_from_param_round_trip() {
    let path = login_path_with_from("/dashboard/students/edit/42");
    let query = path.split_once('?').map(|(_, q)| q).unwrap_or("");

    assert_eq!(
        from_param(query).as_deref(),
        Some("/dashboard/students/edit/42")
    );
}

#[test]
fn test_from_param_rejects_external_targets() {
    assert!(from_param("from=https%3A%2F%2Fevil.example").is_none());
    assert!(from_param("from=%2F%2Fevil.example").is_none());
    assert!(from_param("other=1").is_none());
    assert!(from_param("").is_none());
}
