//! RollBook 共享数据模型
//!
//! 前端与远端 API 之间的公共类型定义：
//! 认证模型、学生记录、响应信封以及端点协议。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod filter;
pub mod protocol;
pub mod validate;

// 重导出 chrono，避免下游 crate 重复声明依赖
pub use chrono;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 认证请求头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 令牌方案前缀 (Authorization: Bearer <token>)
pub const TOKEN_SCHEME: &str = "Bearer";

/// 学生年龄下限（含）
pub const AGE_MIN: u32 = 1;

/// 学生年龄上限（含）
pub const AGE_MAX: u32 = 120;

// =========================================================
// 认证模型 (Auth Models)
// =========================================================

/// 登录请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 注册请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// 账号角色（注册页固定提交默认角色）
    pub role: String,
}

/// 当前登录用户
///
/// 登录响应与 `/auth/me` 共用；服务端可能以 Mongo 风格的
/// `_id` 返回主键，反序列化时两种写法都接受。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// 登录成功后的会话数据（令牌 + 平铺的用户字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl AuthSession {
    /// 提取用户信息部分
    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

// =========================================================
// 学生模型 (Student Models)
// =========================================================

/// 学生记录
///
/// 服务端是唯一数据源：`id` 与 `created_at` 由服务端分配，
/// 客户端从不在本地构造或修改这两个字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub age: u32,
    /// 登记时间（旧数据可能缺失）
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StudentRecord {
    /// 列表中展示的登记日期 (yyyy-mm-dd)
    pub fn enrolled_date(&self) -> Option<String> {
        self.created_at.map(|t| t.format("%Y-%m-%d").to_string())
    }
}

/// 新增学生请求体（id 由服务端分配）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub course: String,
    pub age: u32,
}

/// 编辑学生的差量请求体
///
/// 仅序列化有变更的字段，未改动的字段不会出现在请求中。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl StudentPatch {
    /// 是否没有任何变更
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.course.is_none() && self.age.is_none()
    }
}

// =========================================================
// 响应信封 (Response Envelopes)
// =========================================================

/// 标准响应信封: { success, data?, message? }
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 成功且带有数据时返回数据，否则返回服务端消息（或兜底文案）
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        if self.success {
            if let Some(data) = self.data {
                return Ok(data);
            }
        }
        Err(self.message.unwrap_or_else(|| fallback.to_string()))
    }

    /// 仅关心成功与否的端点（注册、删除等）
    pub fn into_ack(self, fallback: &str) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// 兼容两种部署形态的响应载荷
///
/// 部分部署把数据包在信封里返回，部分直接返回裸数据
/// （例如列表端点直接返回 JSON 数组）。裸数据没有
/// `success` 字段，untagged 解析不会产生歧义。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Enveloped(ApiEnvelope<T>),
    Bare(T),
}

impl<T> Payload<T> {
    /// 取出数据；信封标记失败时返回服务端消息
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        match self {
            Payload::Enveloped(envelope) => envelope.into_data(fallback),
            Payload::Bare(data) => Ok(data),
        }
    }

    /// 仅关心成功与否（新增/编辑端点的响应数据形态不统一）
    pub fn into_ack(self, fallback: &str) -> Result<(), String> {
        match self {
            Payload::Enveloped(envelope) => envelope.into_ack(fallback),
            Payload::Bare(_) => Ok(()),
        }
    }
}

// =========================================================
// 测试
// =========================================================
