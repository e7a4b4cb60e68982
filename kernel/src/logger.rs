//! MIT License
//!
//! Copyright (c) 2026 Fei Wang
//!
//! 内核日志后端
//!
//! 子系统内部统一使用 `log` 宏输出日志，这里提供一个把日志记录
//! 格式化后写到内核控制台的 `log::Log` 实现。控制台由内核在启动时注册，
//! 未注册时日志宏不产生任何输出。
//!
//! 输出格式: `[LEVEL target] message`

use core::fmt::{self, Write};

use log::{LevelFilter, Log, Metadata, Record};
use spin::Once;

/// 控制台输出
///
/// 对应内核的串口/SBI putchar，实现方只需要逐字符串写出
pub trait ConsoleSink: Sync {
    fn write_str(&self, s: &str);
}

/// 把 `fmt::Write` 转发到控制台，换行前补 `\r`
struct Console<'a>(&'a dyn ConsoleSink);

impl fmt::Write for Console<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut rest = s;
        while let Some(pos) = rest.find('\n') {
            self.0.write_str(&rest[..pos]);
            self.0.write_str("\r\n");
            rest = &rest[pos + 1..];
        }
        if !rest.is_empty() {
            self.0.write_str(rest);
        }
        Ok(())
    }
}

struct KernelLogger {
    sink: Once<&'static dyn ConsoleSink>,
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = self.sink.get() {
            let mut console = Console(*sink);
            let _ = writeln!(
                console,
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: KernelLogger = KernelLogger { sink: Once::new() };

/// 日志后端已被安装
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyInitialized;

/// 安装日志后端，级别取自 Kernel.toml 的 `[log] level`
pub fn init(sink: &'static dyn ConsoleSink) -> Result<(), AlreadyInitialized> {
    init_with_level(sink, crate::config::LOG_LEVEL)
}

/// 安装日志后端并指定最大级别
///
/// 只能成功一次。已经安装过任何 logger 时返回 `AlreadyInitialized`，
/// 且不记录 `sink`
pub fn init_with_level(
    sink: &'static dyn ConsoleSink,
    level: LevelFilter,
) -> Result<(), AlreadyInitialized> {
    log::set_logger(&LOGGER).map_err(|_| AlreadyInitialized)?;
    LOGGER.sink.call_once(|| sink);
    log::set_max_level(level);
    Ok(())
}
