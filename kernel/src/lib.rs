//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! Rux 具名信号量子系统
//!
//! 模块划分：
//! - `ipc::sem`: 信号量对象池、名称查找、create/destroy、wait/signal
//! - `sync`: 信号量计数器与等待队列的状态转换
//! - `process`: 进程标识、调度状态、等待队列
//! - `sched`: 与内核调度器的交接接口
//! - `errno`: 标准错误码
//! - `config`: Kernel.toml 生成的配置
//! - `logger`: `log` 后端
//!
//! 使用示例：
//! ```ignore
//! let sems = SemaphoreManager::new(SemConfig::default(), &SCHEDULER)
//!     .expect("Kernel runs out of memory, can't create the semaphore pool");
//!
//! let id = sems.create(pid, "mutex", 1)?;
//! sems.wait(pid, "mutex")?;
//! // ... 临界区 ...
//! sems.signal(pid, "mutex")?;
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod errno;
pub mod ipc;
pub mod logger;
pub mod process;
pub mod sched;
pub mod sync;

#[cfg(test)]
mod tests;

pub use config::SemConfig;
pub use ipc::sem::{SemError, SemId, SemName, SemStat, SemaphoreManager};
pub use process::task::{Pid, TaskState};
pub use sched::{ReadyBucket, Scheduler};
