//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 标准错误代码定义
//!
//! 和 include/uapi/asm-generic/errno.h 保持一致，
//! 只保留信号量子系统会返回的错误码

/// 标准错误代码
///
/// 使用方法：
/// ```rust
/// use ksem::errno::Errno;
///
/// // 系统调用风格，返回负数
/// assert_eq!(Errno::NoSuchFileOrDirectory.as_neg_i32(), -2);
/// ```
#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Errno {
    /// No such file or directory (ENOENT, 2)
    NoSuchFileOrDirectory = 2,

    /// Out of memory (ENOMEM, 12)
    OutOfMemory = 12,

    /// File exists (EEXIST, 17)
    FileExists = 17,

    /// Invalid argument (EINVAL, 22)
    InvalidArgument = 22,

    /// Math result not representable (ERANGE, 34)
    ResultOutOfRange = 34,

    /// File name too long (ENAMETOOLONG, 36)
    FileNameTooLong = 36,

    /// Identifier removed (EIDRM, 43)
    IdentifierRemoved = 43,
}

impl Errno {
    /// 获取错误代码的正数值（用于比较）
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// 获取错误代码的负数值（用于系统调用返回）
    #[inline]
    pub const fn as_neg_i32(self) -> i32 {
        -(self as i32)
    }

    /// 获取错误代码的负数值（u64，用于系统调用返回）
    #[inline]
    pub const fn as_neg_u64(self) -> u64 {
        (-(self as i32)) as u64
    }
}

/// 常用的错误代码常量
pub mod constants {
    pub const ENOENT: i32 = 2;
    pub const ENOMEM: i32 = 12;
    pub const EEXIST: i32 = 17;
    pub const EINVAL: i32 = 22;
    pub const ERANGE: i32 = 34;
    pub const ENAMETOOLONG: i32 = 36;
    pub const EIDRM: i32 = 43;
}
