//! 同步原语 (Synchronization Primitives)
//!
//! 参考 Linux 内核的同步机制设计：
//! - `include/linux/semaphore.h` - 信号量
//!
//! 核心概念：
//! - 信号量用于进程同步和互斥
//! - P 操作 (down): 获取信号量
//! - V 操作 (up): 释放信号量

pub mod semaphore;

pub use semaphore::{DownResult, Semaphore};
