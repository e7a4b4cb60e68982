//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 信号量子系统错误类型
//!
//! 所有错误都返回给调用者，由系统调用层翻译为负的 errno

use core::fmt;

use crate::errno::Errno;

/// 信号量操作错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemError {
    /// 同一 owner 下已存在同名信号量
    AlreadyExists,
    /// 找不到信号量（名称查找失败或句柄无效）
    NotFound,
    /// 信号量池已满且扩容失败
    NoCapacity,
    /// 名称为空
    InvalidName,
    /// 名称超过 SEM_NAME_MAX
    NameTooLong,
    /// 初始值为负数
    InvalidValue,
    /// 计数值溢出 i32
    Overflow,
    /// 等待期间信号量被释放
    Removed,
}

impl SemError {
    /// 对应的标准错误码
    pub const fn errno(self) -> Errno {
        match self {
            SemError::AlreadyExists => Errno::FileExists,
            SemError::NotFound => Errno::NoSuchFileOrDirectory,
            SemError::NoCapacity => Errno::OutOfMemory,
            SemError::InvalidName | SemError::InvalidValue => Errno::InvalidArgument,
            SemError::NameTooLong => Errno::FileNameTooLong,
            SemError::Overflow => Errno::ResultOutOfRange,
            SemError::Removed => Errno::IdentifierRemoved,
        }
    }

    /// 系统调用返回值（负数）
    #[inline]
    pub const fn as_neg_i32(self) -> i32 {
        self.errno().as_neg_i32()
    }
}

impl fmt::Display for SemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SemError::AlreadyExists => "semaphore already exists",
            SemError::NotFound => "semaphore not found",
            SemError::NoCapacity => "semaphore pool exhausted",
            SemError::InvalidName => "invalid semaphore name",
            SemError::NameTooLong => "semaphore name too long",
            SemError::InvalidValue => "invalid semaphore value",
            SemError::Overflow => "semaphore value out of range",
            SemError::Removed => "semaphore removed while waiting",
        };
        f.write_str(msg)
    }
}

impl From<SemError> for Errno {
    fn from(err: SemError) -> Self {
        err.errno()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno::constants;
    use alloc::string::ToString;

    #[test]
    fn test_errno_mapping() {
        assert_eq!(SemError::AlreadyExists.as_neg_i32(), -constants::EEXIST);
        assert_eq!(SemError::NotFound.as_neg_i32(), -constants::ENOENT);
        assert_eq!(SemError::NoCapacity.as_neg_i32(), -constants::ENOMEM);
        assert_eq!(SemError::InvalidName.as_neg_i32(), -constants::EINVAL);
        assert_eq!(SemError::InvalidValue.as_neg_i32(), -constants::EINVAL);
        assert_eq!(SemError::NameTooLong.as_neg_i32(), -constants::ENAMETOOLONG);
        assert_eq!(SemError::Overflow.as_neg_i32(), -constants::ERANGE);
        assert_eq!(SemError::Removed.as_neg_i32(), -constants::EIDRM);
    }

    #[test]
    fn test_display() {
        assert_eq!(SemError::NotFound.to_string(), "semaphore not found");
        assert_eq!(Errno::from(SemError::Removed), Errno::IdentifierRemoved);
    }
}
