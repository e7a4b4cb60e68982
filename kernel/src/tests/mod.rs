//! 信号量子系统测试
//!
//! 两种调度器替身：
//! - [`CoopScheduler`]: 单线程、可观测的协作式调度器，`yield_now` 只计数，
//!   用来逐步检查计数值、等待队列和进程状态
//! - `sem_smp::ThreadScheduler`: 每个进程一个 std 线程，阻塞的进程在条件变量上
//!   睡眠，直到被置为 Ready，用来做多核压力测试
//!
//! 运行测试：
//! ```bash
//! cargo test --package ksem
//! ```

mod sem_protocol;

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;

use crate::config::SemConfig;
use crate::ipc::sem::SemaphoreManager;
use crate::process::task::{Pid, TaskState};
use crate::sched::{ReadyBucket, Scheduler};

/// 协作式调度器替身
pub struct CoopScheduler {
    current: Mutex<Pid>,
    states: Mutex<BTreeMap<Pid, TaskState>>,
    ready: Mutex<VecDeque<Pid>>,
    yields: AtomicUsize,
}

impl CoopScheduler {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(0),
            states: Mutex::new(BTreeMap::new()),
            ready: Mutex::new(VecDeque::new()),
            yields: AtomicUsize::new(0),
        }
    }

    /// 切换到指定进程运行（模拟调度器分派）
    pub fn run_as(&self, pid: Pid) {
        *self.current.lock() = pid;
        self.states.lock().insert(pid, TaskState::Running);
        self.ready.lock().retain(|&p| p != pid);
    }

    pub fn state(&self, pid: Pid) -> Option<TaskState> {
        self.states.lock().get(&pid).copied()
    }

    /// 主就绪队列内容
    pub fn ready_queue(&self) -> Vec<Pid> {
        self.ready.lock().iter().copied().collect()
    }

    pub fn yields(&self) -> usize {
        self.yields.load(Ordering::SeqCst)
    }
}

impl Scheduler for CoopScheduler {
    fn current(&self) -> Pid {
        *self.current.lock()
    }

    fn set_state(&self, pid: Pid, state: TaskState) {
        self.states.lock().insert(pid, state);
    }

    fn yield_now(&self) {
        self.yields.fetch_add(1, Ordering::SeqCst);
    }

    fn enqueue_ready(&self, pid: Pid, bucket: ReadyBucket) {
        assert_eq!(bucket, ReadyBucket::PRIMARY, "semaphores only wake into the primary bucket");
        let state = self.state(pid);
        assert!(
            state.is_some_and(|s| s.is_runnable()),
            "pid {} enqueued while {:?}",
            pid,
            state
        );
        let mut ready = self.ready.lock();
        assert!(!ready.contains(&pid), "pid {} enqueued twice", pid);
        ready.push_back(pid);
    }
}

/// 以协作式调度器创建管理器
pub fn coop_manager(sched: &CoopScheduler, initial: usize) -> SemaphoreManager<&CoopScheduler> {
    SemaphoreManager::new(SemConfig::new(initial, 1024), sched)
        .expect("initial pool allocation")
}
