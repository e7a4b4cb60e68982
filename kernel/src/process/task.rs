//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 任务标识与调度状态
//!
//! 信号量协议只读写进程控制块上的一个字段：调度状态。
//! 进程本身通过 [`Pid`] 引用，不持有任何指针，
//! 因此进程表的重排不会让等待队列失效。

/// 进程标识符 (PID 类型)
///
/// 遵循 Linux 内核的 pid_t 类型
pub type Pid = u32;

/// 进程调度状态
///
/// - Running: 正在 CPU 上运行
/// - Ready: 位于某个就绪队列中，等待被调度
/// - Blocked: 位于某个信号量的等待队列中
///
/// 一个进程同一时刻只会出现在一个队列里：
/// 要么是信号量的等待队列，要么是调度器的就绪队列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum TaskState {
    /// 正在运行
    Running = 0,

    /// 可运行，等待调度
    Ready = 1,

    /// 阻塞在信号量上
    Blocked = 2,
}

impl TaskState {
    /// 是否处于阻塞状态
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, TaskState::Blocked)
    }

    /// 是否可被调度器选中
    #[inline]
    pub const fn is_runnable(self) -> bool {
        matches!(self, TaskState::Running | TaskState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taskstate_values() {
        assert_eq!(TaskState::Running as u32, 0, "Running should be 0");
        assert_eq!(TaskState::Ready as u32, 1, "Ready should be 1");
        assert_eq!(TaskState::Blocked as u32, 2, "Blocked should be 2");
    }

    #[test]
    fn test_taskstate_predicates() {
        assert!(TaskState::Blocked.is_blocked());
        assert!(!TaskState::Blocked.is_runnable());
        assert!(TaskState::Ready.is_runnable());
        assert!(TaskState::Running.is_runnable());
    }
}
