//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!

//! 调度器交接接口
//!
//! 信号量子系统不实现调度算法，只通过 [`Scheduler`] 与内核调度器交互：
//! - `yield_now()`: 对应 Linux 的 schedule()，让出 CPU，
//!   直到当前进程再次被选中才返回
//! - `enqueue_ready()`: 对应 Linux 的 enqueue_task()，把进程放入就绪队列
//! - `set_state()`: 写进程控制块的调度状态字段
//!
//! 调度方式是协作式的：进程一直运行，直到主动让出 CPU
//! （显式调用，或在信号量 wait 中阻塞）。

use crate::process::task::{Pid, TaskState};

/// 就绪队列桶
///
/// 调度器可以有多个就绪队列（按优先级分桶），
/// 信号量唤醒总是放入主桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadyBucket(pub usize);

impl ReadyBucket {
    /// 主（默认）就绪队列
    pub const PRIMARY: ReadyBucket = ReadyBucket(0);
}

/// 内核调度器需要向信号量子系统提供的操作
///
/// 调用约定：
/// - `set_state(pid, Blocked)` 在信号量临界区内调用，
///   `yield_now()` 在所有信号量锁释放之后调用
/// - 唤醒可能先于被唤醒者真正让出 CPU（多核下），
///   此时 `yield_now()` 必须看到 Ready 状态并尽快返回，不能丢失唤醒
pub trait Scheduler {
    /// 当前正在运行的进程
    fn current(&self) -> Pid;

    /// 写进程的调度状态字段
    fn set_state(&self, pid: Pid, state: TaskState);

    /// 让出 CPU，直到当前进程再次被调度才返回
    fn yield_now(&self);

    /// 把进程插入指定的就绪队列桶
    fn enqueue_ready(&self, pid: Pid, bucket: ReadyBucket);
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn current(&self) -> Pid {
        (**self).current()
    }

    fn set_state(&self, pid: Pid, state: TaskState) {
        (**self).set_state(pid, state)
    }

    fn yield_now(&self) {
        (**self).yield_now()
    }

    fn enqueue_ready(&self, pid: Pid, bucket: ReadyBucket) {
        (**self).enqueue_ready(pid, bucket)
    }
}

/// 唤醒一个进程：状态置为 Ready，放入主就绪队列
///
/// 对应 Linux 的 wake_up_process()
pub fn wake_up_process<S: Scheduler + ?Sized>(sched: &S, pid: Pid) {
    sched.set_state(pid, TaskState::Ready);
    sched.enqueue_ready(pid, ReadyBucket::PRIMARY);
}
