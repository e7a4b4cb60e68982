//! 定长信号量名称
//!
//! 名称直接存放在槽位里，不单独分配堆内存，长度上限为 `SEM_NAME_MAX` 字节。

use core::fmt;

use crate::config::SEM_NAME_MAX;

use super::SemError;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SemName {
    buf: [u8; SEM_NAME_MAX],
    len: u8,
}

impl SemName {
    /// 空名称，只用于空闲槽位
    pub const EMPTY: SemName = SemName {
        buf: [0; SEM_NAME_MAX],
        len: 0,
    };

    /// 校验并拷贝名称
    ///
    /// 空字符串返回 `InvalidName`，超长返回 `NameTooLong`
    pub fn new(name: &str) -> Result<Self, SemError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() {
            return Err(SemError::InvalidName);
        }
        if bytes.len() > SEM_NAME_MAX {
            return Err(SemError::NameTooLong);
        }

        let mut buf = [0; SEM_NAME_MAX];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len() as u8,
        })
    }

    pub fn as_str(&self) -> &str {
        // 只能由 &str 构造，内容必然是合法 UTF-8
        core::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq<str> for SemName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Debug for SemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SemName({:?})", self.as_str())
    }
}

impl fmt::Display for SemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
