//! 学生列表过滤
//!
//! 纯函数层：过滤从不修改源列表，相同输入永远得到相同输出，
//! 对过滤结果再次过滤不会改变它。

use crate::StudentRecord;

/// 判断单条记录是否命中关键字
///
/// 对姓名**或**课程做不区分大小写的子串匹配。
pub fn matches_term(record: &StudentRecord, term: &str) -> bool {
    let needle = term.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record.course.to_lowercase().contains(&needle)
}

/// 按关键字过滤学生列表
///
/// 空关键字返回完整列表。
pub fn filter_students(records: &[StudentRecord], term: &str) -> Vec<StudentRecord> {
    if term.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches_term(record, term))
        .cloned()
        .collect()
}
