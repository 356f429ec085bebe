//! 列表请求的序号门闩
//!
//! 刷新与删除后重载可能并发发起多次列表请求，
//! 响应到达顺序和发起顺序无关。每次发起领取一个递增序号，
//! 只有比"已落地"更新的响应才允许写入界面，迟到的旧响应直接丢弃。

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct FetchGate {
    issued: Rc<Cell<u64>>,
    applied: Rc<Cell<u64>>,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起一次请求，返回它的序号
    pub fn issue(&self) -> u64 {
        let seq = self.issued.get() + 1;
        self.issued.set(seq);
        seq
    }

    /// 尝试落地序号为 `seq` 的响应
    ///
    /// 返回 false 表示已有更新的响应先行落地，本次结果应被丢弃。
    pub fn admit(&self, seq: u64) -> bool {
        if seq > self.applied.get() {
            self.applied.set(seq);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_responses_all_admitted() {
        let gate = FetchGate::new();
        let first = gate.issue();
        let second = gate.issue();

        // 按发起顺序到达，全部落地
        assert!(gate.admit(first));
        assert!(gate.admit(second));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let gate = FetchGate::new();
        let first = gate.issue();
        let second = gate.issue();

        // 新请求的响应先到
        assert!(gate.admit(second));
        // 旧请求的响应迟到，拒绝落地
        assert!(!gate.admit(first));
    }

    #[test]
    fn test_issue_numbers_increase() {
        let gate = FetchGate::new();
        let a = gate.issue();
        let b = gate.issue();
        let c = gate.issue();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_clones_share_state() {
        let gate = FetchGate::new();
        let clone = gate.clone();

        let first = gate.issue();
        let second = clone.issue();

        assert!(clone.admit(second));
        // 克隆体之间共享同一份计数
        assert!(!gate.admit(first));
    }

    #[test]
    fn test_same_sequence_admitted_once() {
        let gate = FetchGate::new();
        let seq = gate.issue();

        assert!(gate.admit(seq));
        assert!(!gate.admit(seq));
    }
}
