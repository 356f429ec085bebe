//! 运行时配置
//!
//! API 基地址在编译期通过环境变量覆盖，默认走同源反向代理。

/// 默认 API 基地址（同源部署时由反向代理转发）
const DEFAULT_API_URL: &str = "/api";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    /// 读取编译期配置
    ///
    /// `ROLLBOOK_API_URL` 在 trunk build 时通过环境变量注入，
    /// 未设置时使用同源默认值。
    pub fn load() -> Self {
        let api_base_url = option_env!("ROLLBOOK_API_URL")
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self { api_base_url }
    }
}
