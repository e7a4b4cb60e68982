//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 信号量对象池
//!
//! 池是一个按下标寻址的槽位数组：
//! - 句柄 ([`SemId`]) 就是槽位下标，扩容搬移存储后依然有效
//! - 分配时线性扫描第一个空闲槽位，找不到则容量翻倍
//! - 容量只增不减，单个槽位通过 free 归还
//!
//! 扩容按记录个数预留空间 (`try_reserve_exact`)，分配器拒绝时返回
//! `NoCapacity`，不会 panic。
//!
//! 池本身不加锁，由 [`super::SemaphoreManager`] 放在读写锁后面；
//! 每个槽位的计数值和等待队列另有一把自旋锁。

use alloc::vec::Vec;

use log::{debug, info, warn};
use spin::{Mutex, MutexGuard};

use crate::config::SemConfig;
use crate::process::task::Pid;
use crate::sync::Semaphore;

use super::name::SemName;
use super::SemError;

/// 信号量句柄（槽位下标）
pub type SemId = usize;

/// 信号量槽位
pub struct SemSlot {
    occupied: bool,
    owner: Pid,
    name: SemName,
    /// 计数值 + 等待队列，必须一起修改
    sem: Mutex<Semaphore>,
}

impl SemSlot {
    fn vacant() -> Self {
        Self {
            occupied: false,
            owner: 0,
            name: SemName::EMPTY,
            sem: Mutex::new(Semaphore::new(0)),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn owner(&self) -> Pid {
        self.owner
    }

    pub fn name(&self) -> &SemName {
        &self.name
    }

    /// 进入该信号量的临界区
    pub fn lock(&self) -> MutexGuard<'_, Semaphore> {
        self.sem.lock()
    }

    pub(super) fn matches(&self, owner: Pid, name: &str) -> bool {
        self.occupied && self.owner == owner && self.name == *name
    }

    /// 绑定 owner、名称和初始值
    pub(super) fn bind(&mut self, owner: Pid, name: SemName, value: i32) {
        self.owner = owner;
        self.name = name;
        self.sem.get_mut().init(value);
    }

    /// 重置为空闲槽位，返回被遗弃的等待者
    fn reset(&mut self) -> Vec<Pid> {
        let waiters = self.sem.get_mut().reset();
        self.occupied = false;
        self.owner = 0;
        self.name = SemName::EMPTY;
        waiters
    }
}

/// 信号量对象池
pub struct SemPool {
    slots: Vec<SemSlot>,
    /// 已占用槽位数
    used: usize,
    max_capacity: usize,
}

impl SemPool {
    /// 按启动参数创建池
    ///
    /// 初始分配失败返回 `NoCapacity`，启动阶段由调用者视为致命错误
    pub fn new(config: &SemConfig) -> Result<Self, SemError> {
        let capacity = config.effective_initial();

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| SemError::NoCapacity)?;
        slots.extend((0..capacity).map(|_| SemSlot::vacant()));

        debug!("sem: pool created, capacity={}", capacity);

        Ok(Self {
            slots,
            used: 0,
            max_capacity: config.effective_max(),
        })
    }

    /// 当前容量（槽位总数）
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 已占用的槽位数
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// 分配一个空闲槽位
    ///
    /// 返回的槽位已标记为占用，调用者需在同一把锁内完成绑定
    pub fn allocate(&mut self) -> Result<SemId, SemError> {
        let id = match self.slots.iter().position(|slot| !slot.occupied) {
            Some(id) => id,
            None => self.grow()?,
        };

        self.slots[id].occupied = true;
        self.used += 1;
        Ok(id)
    }

    /// 容量翻倍，返回第一个新槽位
    fn grow(&mut self) -> Result<SemId, SemError> {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity.saturating_mul(2).min(self.max_capacity);

        if new_capacity <= old_capacity {
            warn!("sem: pool full at ceiling {}", self.max_capacity);
            return Err(SemError::NoCapacity);
        }

        if self.slots.try_reserve_exact(new_capacity - old_capacity).is_err() {
            warn!("sem: pool growth {} -> {} refused by allocator", old_capacity, new_capacity);
            return Err(SemError::NoCapacity);
        }
        self.slots
            .extend((old_capacity..new_capacity).map(|_| SemSlot::vacant()));

        info!("sem: pool grown {} -> {}", old_capacity, new_capacity);
        Ok(old_capacity)
    }

    /// 释放槽位
    ///
    /// 句柄越界或槽位空闲时返回 `NotFound`；
    /// 成功时返回仍在等待队列中的进程，调用者必须唤醒它们
    pub fn free(&mut self, id: SemId) -> Result<Vec<Pid>, SemError> {
        let slot = self.get_mut(id)?;
        let waiters = slot.reset();
        self.used -= 1;
        Ok(waiters)
    }

    /// 按句柄获取已占用的槽位
    pub fn get(&self, id: SemId) -> Result<&SemSlot, SemError> {
        match self.slots.get(id) {
            Some(slot) if slot.occupied => Ok(slot),
            _ => Err(SemError::NotFound),
        }
    }

    pub(super) fn get_mut(&mut self, id: SemId) -> Result<&mut SemSlot, SemError> {
        match self.slots.get_mut(id) {
            Some(slot) if slot.occupied => Ok(slot),
            _ => Err(SemError::NotFound),
        }
    }

    /// 遍历已占用的槽位
    pub fn iter(&self) -> impl Iterator<Item = (SemId, &SemSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.occupied)
    }
}
