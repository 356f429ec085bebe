//! 令牌存储
//!
//! 会话令牌唯一的持久化位置是浏览器 LocalStorage 中的单个键。
//! 通过 `TokenStore` trait 抽象，网关与会话逻辑可在原生测试中
//! 使用内存实现。

use gloo_storage::{LocalStorage, Storage};

/// LocalStorage 中会话令牌的键名
pub const TOKEN_STORAGE_KEY: &str = "rollbook_token";

/// 令牌存取抽象
pub trait TokenStore {
    /// 读取令牌；不存在或存储不可用时返回 None
    fn load(&self) -> Option<String>;

    /// 写入令牌，返回是否成功
    fn save(&self, token: &str) -> bool;

    /// 删除令牌（幂等）
    fn clear(&self);
}

/// 浏览器 LocalStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        LocalStorage::get::<String>(TOKEN_STORAGE_KEY).ok()
    }

    fn save(&self, token: &str) -> bool {
        LocalStorage::set(TOKEN_STORAGE_KEY, token).is_ok()
    }

    fn clear(&self) {
        LocalStorage::delete(TOKEN_STORAGE_KEY);
    }
}

// =========================================================
// 测试工具: MockTokenStore
// =========================================================
