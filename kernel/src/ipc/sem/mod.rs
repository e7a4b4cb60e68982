//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 具名信号量 (Named Semaphores)
//!
//! 参考 Linux 内核 `ipc/sem.c`：
//! - 信号量按 (owner, name) 命名，owner 是创建它的进程
//! - create / destroy 管理生命周期
//! - wait (P) / signal (V) 通过调度器阻塞和唤醒进程
//!
//! 锁层次：
//! 1. 对象池读写锁：查找、wait、signal 持读锁；分配、释放、扩容持写锁
//! 2. 槽位自旋锁：计数值和等待队列的修改在同一临界区内完成
//! 3. 调度器内部锁
//!
//! wait 在让出 CPU 之前释放所有信号量锁。

pub mod error;
pub mod name;
pub mod pool;
pub mod registry;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use log::{debug, trace, warn};
use spin::{Mutex, RwLock};

use crate::config::SemConfig;
use crate::process::task::{Pid, TaskState};
use crate::sched::{self, Scheduler};
use crate::sync::DownResult;

pub use error::SemError;
pub use name::SemName;
pub use pool::{SemId, SemPool, SemSlot};

/// 信号量状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemStat {
    pub id: SemId,
    pub owner: Pid,
    pub name: SemName,
    pub value: i32,
    /// 等待者，按 FIFO 顺序
    pub waiters: Vec<Pid>,
}

/// 具名信号量管理器
///
/// 显式持有对象池和调度器接口，由内核在启动时创建并按引用传递
pub struct SemaphoreManager<S: Scheduler> {
    pool: RwLock<SemPool>,
    sched: S,
    /// 因信号量被释放而唤醒的进程，其 wait 返回 `Removed`
    removed: Mutex<BTreeSet<Pid>>,
}

impl<S: Scheduler> SemaphoreManager<S> {
    /// 创建管理器并分配初始对象池
    ///
    /// 初始池分配失败返回 `NoCapacity`；这发生在启动阶段，调用者应视为致命错误
    pub fn new(config: SemConfig, sched: S) -> Result<Self, SemError> {
        Ok(Self {
            pool: RwLock::new(SemPool::new(&config)?),
            sched,
            removed: Mutex::new(BTreeSet::new()),
        })
    }

    pub fn scheduler(&self) -> &S {
        &self.sched
    }

    /// 创建信号量
    ///
    /// 先检查重名再占用槽位，重名时不消耗槽位
    pub fn create(&self, owner: Pid, name: &str, initial_value: i32) -> Result<SemId, SemError> {
        let name = SemName::new(name)?;
        if initial_value < 0 {
            return Err(SemError::InvalidValue);
        }

        let mut pool = self.pool.write();
        if pool.lookup(owner, name.as_str()).is_ok() {
            debug!("sem: create owner={} name={} rejected, already exists", owner, name);
            return Err(SemError::AlreadyExists);
        }

        let id = pool.allocate()?;
        pool.get_mut(id)?.bind(owner, name, initial_value);

        debug!("sem: created id={} owner={} name={} value={}", id, owner, name, initial_value);
        Ok(id)
    }

    /// P 操作
    ///
    /// 值减 1；结果为负时当前进程进入等待队列并阻塞。
    /// 无论是否阻塞都会让出一次 CPU。
    ///
    /// # 返回
    /// - `Ok(())` - 获取到信号量
    /// - `Err(NotFound)` - 信号量不存在（不会让出 CPU）
    /// - `Err(Removed)` - 等待期间信号量被释放
    pub fn wait(&self, owner: Pid, name: &str) -> Result<(), SemError> {
        let current = self.sched.current();
        // 正在运行的进程不可能有待处理的移除登记，残留的只能来自 pid 复用
        self.removed.lock().remove(&current);

        let outcome = {
            let pool = self.pool.read();
            let id = pool.lookup(owner, name)?;
            let mut sem = pool.get(id)?.lock();
            let outcome = sem.down(current)?;
            if outcome == DownResult::Blocked {
                // 必须在临界区内置为 Blocked，signal 随后才能看到并唤醒它
                self.sched.set_state(current, TaskState::Blocked);
            }
            trace!(
                "sem: wait id={} pid={} value={} {:?}",
                id,
                current,
                sem.count(),
                outcome
            );
            outcome
        };

        self.sched.yield_now();

        if outcome == DownResult::Blocked && self.removed.lock().remove(&current) {
            warn!("sem: pid {} woken because {}/{} was removed", current, owner, name);
            return Err(SemError::Removed);
        }
        Ok(())
    }

    /// V 操作
    ///
    /// 值加 1；结果不大于 0 时唤醒等待最久的进程，放入主就绪队列。
    /// 不让出 CPU。
    ///
    /// # 返回
    /// 被唤醒的进程（如果有）
    pub fn signal(&self, owner: Pid, name: &str) -> Result<Option<Pid>, SemError> {
        let pool = self.pool.read();
        let id = pool.lookup(owner, name)?;
        let mut sem = pool.get(id)?.lock();

        let woken = sem.up()?;
        if let Some(pid) = woken {
            sched::wake_up_process(&self.sched, pid);
        }

        trace!("sem: signal id={} value={} woke {:?}", id, sem.count(), woken);
        Ok(woken)
    }

    /// 按句柄释放信号量
    ///
    /// 仍在等待的进程全部被唤醒，它们的 wait 返回 `Removed`。
    ///
    /// # 返回
    /// 被唤醒的进程数量
    pub fn free(&self, id: SemId) -> Result<usize, SemError> {
        let waiters = self.pool.write().free(id)?;
        debug!("sem: freed id={} waiters={}", id, waiters.len());
        Ok(self.wake_removed(waiters))
    }

    /// 按名称释放信号量
    pub fn destroy(&self, owner: Pid, name: &str) -> Result<usize, SemError> {
        let waiters = {
            let mut pool = self.pool.write();
            let id = pool.lookup(owner, name)?;
            pool.free(id)?
        };
        debug!("sem: destroyed owner={} name={} waiters={}", owner, name, waiters.len());
        Ok(self.wake_removed(waiters))
    }

    /// 释放某个 owner 的全部信号量（进程退出时调用）
    ///
    /// 同时清除该进程残留的移除登记，pid 被复用时不会误收 `Removed`
    ///
    /// # 返回
    /// 释放的信号量数量
    pub fn release_owner(&self, owner: Pid) -> usize {
        let (freed, waiters) = {
            let mut pool = self.pool.write();
            let ids = pool.owned_by(owner);
            let mut waiters = Vec::new();
            for &id in &ids {
                if let Ok(mut drained) = pool.free(id) {
                    waiters.append(&mut drained);
                }
            }
            (ids.len(), waiters)
        };
        self.removed.lock().remove(&owner);

        if freed > 0 {
            debug!("sem: released {} semaphores of owner {}", freed, owner);
        }
        self.wake_removed(waiters);
        freed
    }

    /// 唤醒被遗弃的等待者
    ///
    /// 先登记再唤醒，被唤醒者返回时一定能看到登记
    fn wake_removed(&self, waiters: Vec<Pid>) -> usize {
        if waiters.is_empty() {
            return 0;
        }

        self.removed.lock().extend(waiters.iter().copied());
        for &pid in &waiters {
            sched::wake_up_process(&self.sched, pid);
        }
        warn!("sem: woke {} waiters of a removed semaphore", waiters.len());
        waiters.len()
    }

    /// 进程是否还有未被 wait 取走的移除登记
    #[cfg(test)]
    pub(crate) fn removal_pending(&self, pid: Pid) -> bool {
        self.removed.lock().contains(&pid)
    }

    /// 按 (owner, name) 查找句柄
    pub fn lookup(&self, owner: Pid, name: &str) -> Result<SemId, SemError> {
        self.pool.read().lookup(owner, name)
    }

    /// 信号量当前值
    pub fn value(&self, id: SemId) -> Result<i32, SemError> {
        Ok(self.pool.read().get(id)?.lock().count())
    }

    /// 等待者列表（FIFO 顺序）
    pub fn waiters(&self, id: SemId) -> Result<Vec<Pid>, SemError> {
        Ok(self.pool.read().get(id)?.lock().waiters().iter().collect())
    }

    /// 信号量状态快照
    pub fn stat(&self, id: SemId) -> Result<SemStat, SemError> {
        let pool = self.pool.read();
        let slot = pool.get(id)?;
        let sem = slot.lock();
        Ok(SemStat {
            id,
            owner: slot.owner(),
            name: *slot.name(),
            value: sem.count(),
            waiters: sem.waiters().iter().collect(),
        })
    }

    /// 对象池容量
    pub fn capacity(&self) -> usize {
        self.pool.read().capacity()
    }

    /// 已创建的信号量数量
    pub fn len(&self) -> usize {
        self.pool.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.read().is_empty()
    }
}
