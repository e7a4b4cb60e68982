//! 进程间通信 (IPC)
//!
//! 参考 Linux 内核 `ipc/` 目录，目前只有具名信号量

pub mod sem;

pub use sem::{SemError, SemId, SemStat, SemaphoreManager};
