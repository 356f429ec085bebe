//! 学生表单的字段状态
//!
//! 新增与编辑共用同一份状态。编辑模式下保留原始档案，
//! 提交时通过 [`StudentFormState::to_patch`] 只下发发生变化的字段。

use leptos::prelude::*;
use rollbook_shared::validate::{FieldError, validate_student};
use rollbook_shared::{CreateStudentRequest, StudentPatch, StudentRecord};

/// 表单字段信号的集合（Copy，可随意传入闭包）
#[derive(Clone, Copy)]
pub struct StudentFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub course: RwSignal<String>,
    /// 年龄保存原始输入文本，解析失败当作未填写
    pub age: RwSignal<String>,
    pub errors: RwSignal<Vec<FieldError>>,
}

impl StudentFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            course: RwSignal::new(String::new()),
            age: RwSignal::new(String::new()),
            errors: RwSignal::new(Vec::new()),
        }
    }

    /// 用已有档案填充表单（编辑模式）
    pub fn fill_from(&self, record: &StudentRecord) {
        self.name.set(record.name.clone());
        self.email.set(record.email.clone());
        self.course.set(record.course.clone());
        self.age.set(record.age.to_string());
    }

    /// 解析年龄输入
    pub fn parsed_age(&self) -> Option<u32> {
        self.age.with(|text| text.trim().parse().ok())
    }

    /// 校验全部字段，返回是否通过；校验结果写入 `errors`
    pub fn validate(&self) -> bool {
        let errors = self.name.with(|name| {
            self.email.with(|email| {
                self.course.with(|course| {
                    validate_student(name.trim(), email.trim(), course.trim(), self.parsed_age())
                })
            })
        });
        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }

    /// 指定字段当前的校验错误
    pub fn error_for(&self, field: &'static str) -> Option<String> {
        self.errors.with(|errs| {
            errs.iter()
                .find(|e| e.field == field)
                .map(|e| e.message.clone())
        })
    }

    /// 构造新增请求
    ///
    /// 仅在 [`validate`](Self::validate) 通过后调用，此时年龄必然可解析。
    pub fn to_create_request(&self) -> CreateStudentRequest {
        CreateStudentRequest {
            name: self.name.with(|v| v.trim().to_string()),
            email: self.email.with(|v| v.trim().to_string()),
            course: self.course.with(|v| v.trim().to_string()),
            age: self.parsed_age().unwrap_or_default(),
        }
    }

    /// 与原始档案比对，生成只含变化字段的补丁
    pub fn to_patch(&self, original: &StudentRecord) -> StudentPatch {
        let name = self.name.with(|v| v.trim().to_string());
        let email = self.email.with(|v| v.trim().to_string());
        let course = self.course.with(|v| v.trim().to_string());
        let age = self.parsed_age();

        StudentPatch {
            name: (name != original.name).then_some(name),
            email: (email != original.email).then_some(email),
            course: (course != original.course).then_some(course),
            age: age.filter(|a| *a != original.age),
        }
    }
}

impl Default for StudentFormState {
    fn default() -> Self {
        Self::new()
    }
}
