//! mac80211 接收状态
//!
//! 对应 Linux net/mac80211.h：struct ieee80211_rx_status 与 RX_FLAG_*。
//! 驱动在把帧交给协议栈前填好该记录（IEEE80211_SKB_RXCB）。

use crate::ieee80211::{Band, Channel};

/// RX_FLAG_*（与 mac80211 位定义一致）
pub mod rx_flag {
    pub const MMIC_ERROR: u32 = 1 << 0;
    pub const DECRYPTED: u32 = 1 << 1;
    pub const MMIC_STRIPPED: u32 = 1 << 3;
    pub const IV_STRIPPED: u32 = 1 << 4;
    pub const FAILED_FCS_CRC: u32 = 1 << 5;
}

/// 接收状态（对应 struct ieee80211_rx_status）
///
/// `Default` 即全 0，协议栈依赖未填字段为 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxStatus {
    pub mactime: u64,
    pub band: Band,
    /// 中心频率 MHz
    pub freq: u32,
    /// dBm
    pub signal: i32,
    pub antenna: u8,
    pub rate_idx: u8,
    /// RX_FLAG_*
    pub flag: u32,
    pub rx_flags: u16,
}

impl RxStatus {
    /// 从当前信道取频率与频段
    pub fn on_channel(channel: &Channel) -> Self {
        Self {
            band: channel.band,
            freq: channel.center_freq,
            ..Self::default()
        }
    }

    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flag & flag == flag
    }
}
