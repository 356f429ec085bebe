//! 客户端表单校验
//!
//! 所有校验在发起网络请求之前执行，任何一项不通过都会阻止提交。
//! 邮箱只做语法检查，真实性由服务端判断。

use crate::{AGE_MAX, AGE_MIN};

/// 密码最小长度
pub const PASSWORD_MIN_LEN: usize = 6;

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// 字段名（与表单输入一一对应）
    pub field: &'static str,
    /// 展示给用户的消息
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// =========================================================
// 单字段校验
// =========================================================

/// 姓名：非空
pub fn check_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        Some(FieldError::new("name", "Name is required"))
    } else {
        None
    }
}

/// 邮箱：local@domain，domain 至少包含一个点
pub fn check_email(email: &str) -> Option<FieldError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        None
    } else {
        Some(FieldError::new("email", "Enter a valid email address"))
    }
}

/// 课程：非空
pub fn check_course(course: &str) -> Option<FieldError> {
    if course.trim().is_empty() {
        Some(FieldError::new("course", "Course is required"))
    } else {
        None
    }
}

/// 年龄：AGE_MIN..=AGE_MAX 的整数；None 表示输入无法解析
pub fn check_age(age: Option<u32>) -> Option<FieldError> {
    match age {
        Some(age) if (AGE_MIN..=AGE_MAX).contains(&age) => None,
        Some(_) => Some(FieldError::new(
            "age",
            format!("Age must be between {} and {}", AGE_MIN, AGE_MAX),
        )),
        None => Some(FieldError::new("age", "Enter a valid age")),
    }
}

/// 密码：最小长度
pub fn check_password(password: &str) -> Option<FieldError> {
    if password.len() < PASSWORD_MIN_LEN {
        Some(FieldError::new(
            "password",
            format!("Password must be at least {} characters", PASSWORD_MIN_LEN),
        ))
    } else {
        None
    }
}

/// 两次输入的密码必须一致
pub fn check_password_confirm(password: &str, confirm: &str) -> Option<FieldError> {
    if password == confirm {
        None
    } else {
        Some(FieldError::new("confirm_password", "Passwords do not match"))
    }
}

// =========================================================
// 表单级校验
// =========================================================

/// 学生表单的全部校验（新增与编辑共用）
pub fn validate_student(
    name: &str,
    email: &str,
    course: &str,
    age: Option<u32>,
) -> Vec<FieldError> {
    [
        check_name(name),
        check_email(email),
        check_course(course),
        check_age(age),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// 注册表单的全部校验
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Vec<FieldError> {
    [
        check_name(name),
        check_email(email),
        check_password(password),
        check_password_confirm(password, confirm),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests;
