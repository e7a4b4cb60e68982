//! 进程接口模块
//!
//! 信号量子系统只需要进程模型的一小部分：
//! - `task`: 进程标识符与调度状态 (task_struct::pid / state)
//! - `wait`: 等待队列 (kernel/sched/wait.c)
//!
//! 进程控制块本身由内核的进程管理维护，这里不涉及

pub mod task;
pub mod wait;

pub use task::{Pid, TaskState};
pub use wait::WaitQueueHead;
