//! 信号量名称查找
//!
//! 名字空间按 owner 划分：不同 owner 可以使用相同的名称，
//! 查找时 owner 和名称必须同时精确匹配。

use alloc::vec::Vec;

use crate::process::task::Pid;

use super::pool::{SemId, SemPool};
use super::SemError;

impl SemPool {
    /// 按 (owner, name) 查找信号量句柄
    pub fn lookup(&self, owner: Pid, name: &str) -> Result<SemId, SemError> {
        self.iter()
            .find(|(_, slot)| slot.matches(owner, name))
            .map(|(id, _)| id)
            .ok_or(SemError::NotFound)
    }

    /// 某个 owner 创建的所有信号量
    pub fn owned_by(&self, owner: Pid) -> Vec<SemId> {
        self.iter()
            .filter(|(_, slot)| slot.owner() == owner)
            .map(|(id, _)| id)
            .collect()
    }
}
