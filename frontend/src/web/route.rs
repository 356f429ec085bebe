//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys：
//! 路径解析、受保护前缀策略、登录回跳参数，
//! 以及"公共 / 待定 / 已决"三态路由守卫。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页 (默认路由)
    #[default]
    Home,
    /// 登录页面
    Login,
    /// 注册页面
    Register,
    /// 控制台总览 (需要认证)
    Dashboard,
    /// 学生列表 (需要认证)
    Students,
    /// 新增学生 (需要认证)
    StudentAdd,
    /// 编辑学生 (需要认证)
    StudentEdit(String),
    /// 课程 (需要认证)
    Courses,
    /// 报表 (需要认证)
    Reports,
    /// 设置 (需要认证)
    Settings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 查询串不参与匹配；除根路径外忽略结尾的 `/`。
    pub fn from_path(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or(path);
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "/" | "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/dashboard/students" => Self::Students,
            "/dashboard/students/add" => Self::StudentAdd,
            "/dashboard/courses" => Self::Courses,
            "/dashboard/reports" => Self::Reports,
            "/dashboard/settings" => Self::Settings,
            _ => {
                if let Some(id) = path.strip_prefix("/dashboard/students/edit/") {
                    if !id.is_empty() && !id.contains('/') {
                        return Self::StudentEdit(id.to_string());
                    }
                }
                Self::NotFound
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Students => "/dashboard/students".to_string(),
            Self::StudentAdd => "/dashboard/students/add".to_string(),
            Self::StudentEdit(id) => format!("/dashboard/students/edit/{}", id),
            Self::Courses => "/dashboard/courses".to_string(),
            Self::Reports => "/dashboard/reports".to_string(),
            Self::Settings => "/dashboard/settings".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：该路由是否需要认证**
    ///
    /// 受保护区域是 `/dashboard` 前缀下的所有页面。
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Students
                | Self::StudentAdd
                | Self::StudentEdit(_)
                | Self::Courses
                | Self::Reports
                | Self::Settings
        )
    }

    /// 已认证用户是否应离开此路由（登录/注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功后的默认落点
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 路由守卫（三态判定）
// =========================================================

/// 守卫判定所需的会话快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionGate {
    /// 启动恢复是否仍在进行
    pub is_loading: bool,
    /// 是否已认证
    pub is_authenticated: bool,
}

/// 已决状态下的处理方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 渲染目标页面
    Render,
    /// 跳转登录页，并携带原始路径以便登录后返回
    RedirectToLogin { from: String },
}

/// 三态守卫判定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// 公共页面，无条件渲染
    Public,
    /// 会话尚未恢复完成：渲染占位内容，不做任何跳转
    Checking,
    /// 会话状态已知，给出最终判定
    Decided(GuardDecision),
}

/// 路由守卫
///
/// 受保护路由在会话恢复期间保持 `Checking`，
/// 避免启动时对已登录用户产生一次错误的登录页跳转。
pub fn guard_route(route: &AppRoute, gate: SessionGate) -> GuardVerdict {
    if !route.requires_auth() {
        return GuardVerdict::Public;
    }
    if gate.is_loading {
        return GuardVerdict::Checking;
    }
    if gate.is_authenticated {
        GuardVerdict::Decided(GuardDecision::Render)
    } else {
        GuardVerdict::Decided(GuardDecision::RedirectToLogin {
            from: route.to_path(),
        })
    }
}

// =========================================================
// 登录页回跳参数
// =========================================================

/// 构造携带原始路径的登录页地址
pub fn login_path_with_from(from: &str) -> String {
    // 默认落点不需要回跳参数
    if from.is_empty() || from == AppRoute::auth_success_redirect().to_path() {
        return AppRoute::Login.to_path();
    }
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("from", from)
        .finish();
    format!("{}?{}", AppRoute::Login.to_path(), query)
}

/// 从查询串中解析 from 参数
///
/// 仅接受站内路径（以单个 `/` 开头），拒绝外部地址。
pub fn from_param(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "from")
        .map(|(_, value)| value.into_owned())
        .filter(|value| value.starts_with('/') && !value.starts_with("//"))
}

#[cfg(test)]
mod tests;
