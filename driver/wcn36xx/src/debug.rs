//! 按类别开关的调试日志
//!
//! 调试掩码可在运行时修改（配置文件 DEBUG_MASK=），`wcn_dbg!` 与 [`dbg_dump`] 只在对应类别
//! 打开时输出，日志 target 按类别区分。

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

/// 调试类别位
pub mod dbg_mask {
    pub const NONE: u32 = 0;
    pub const RX: u32 = 0x0000_0010;
    pub const RX_DUMP: u32 = 0x0000_0020;
    pub const TX: u32 = 0x0000_0040;
    pub const TX_DUMP: u32 = 0x0000_0080;
    pub const BEACON: u32 = 0x0000_0800;
    pub const BEACON_DUMP: u32 = 0x0000_1000;
    pub const ANY: u32 = 0xffff_ffff;
}

static DEBUG_MASK: AtomicU32 = AtomicU32::new(dbg_mask::NONE);

pub fn set_debug_mask(mask: u32) {
    DEBUG_MASK.store(mask, Ordering::Relaxed);
}

pub fn debug_mask() -> u32 {
    DEBUG_MASK.load(Ordering::Relaxed)
}

#[inline]
pub fn dbg_enabled(mask: u32) -> bool {
    debug_mask() & mask != 0
}

/// 类别对应的日志 target
pub fn dbg_target(mask: u32) -> &'static str {
    if mask & (dbg_mask::BEACON | dbg_mask::BEACON_DUMP) != 0 {
        "wireless::wcn36xx::beacon"
    } else if mask & (dbg_mask::RX | dbg_mask::RX_DUMP) != 0 {
        "wireless::wcn36xx::rx"
    } else if mask & (dbg_mask::TX | dbg_mask::TX_DUMP) != 0 {
        "wireless::wcn36xx::tx"
    } else {
        "wireless::wcn36xx"
    }
}

/// 类别打开时以 debug 级别输出
macro_rules! wcn_dbg {
    ($mask:expr, $($arg:tt)+) => {
        if $crate::debug::dbg_enabled($mask) {
            ::log::debug!(target: $crate::debug::dbg_target($mask), $($arg)+);
        }
    };
}
pub(crate) use wcn_dbg;

/// 一行最多 16 字节的十六进制
struct HexRow<'a>(&'a [u8]);

impl fmt::Display for HexRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// 类别打开时按 16 字节一行输出帧内容
pub fn dbg_dump(mask: u32, prefix: &str, buf: &[u8]) {
    if !dbg_enabled(mask) {
        return;
    }
    let target = dbg_target(mask);
    log::debug!(target: target, "{}len {}", prefix, buf.len());
    for (i, row) in buf.chunks(16).enumerate() {
        log::debug!(target: target, "{}{:08x}: {}", prefix, i * 16, HexRow(row));
    }
}
