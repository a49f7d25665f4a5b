//! IEEE 802.11 类型与常量
//!
//! 对应 Linux include/linux/ieee80211.h 中收发路径用到的部分：频段、信道、frame_control 分类、
//! 头长度与序列号。

/// 频段（对应 IEEE80211_BAND_*）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Band {
    #[default]
    TwoGhz = 0,
    FiveGhz = 1,
}

/// 信道（对应 struct ieee80211_channel）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    /// 中心频率 MHz
    pub center_freq: u32,
    /// 频段
    pub band: Band,
    /// 硬件信道号（对应 hw_value）
    pub hw_value: u16,
}

impl Channel {
    pub const fn new_2g(freq_mhz: u32, hw_value: u16) -> Self {
        Self {
            center_freq: freq_mhz,
            band: Band::TwoGhz,
            hw_value,
        }
    }

    pub const fn new_5g(freq_mhz: u32, hw_value: u16) -> Self {
        Self {
            center_freq: freq_mhz,
            band: Band::FiveGhz,
            hw_value,
        }
    }
}

/// frame_control 各子域（little-endian 主机值，对应 IEEE80211_FCTL_* / IEEE80211_STYPE_*）
pub mod fc {
    pub const FTYPE: u16 = 0x000C;
    pub const STYPE: u16 = 0x00F0;
    pub const TODS: u16 = 0x0100;
    pub const FROMDS: u16 = 0x0200;
    pub const PROTECTED: u16 = 0x4000;
    pub const ORDER: u16 = 0x8000;

    pub const TYPE_MGMT: u16 = 0x0000;
    pub const TYPE_CTL: u16 = 0x0004;
    pub const TYPE_DATA: u16 = 0x0008;

    pub const SUBTYPE_BEACON: u16 = 0x0080;
    pub const SUBTYPE_PROBE_RESP: u16 = 0x0050;
    pub const SUBTYPE_QOS_DATA: u16 = 0x0080;
    pub const SUBTYPE_CTS: u16 = 0x00C0;
    pub const SUBTYPE_ACK: u16 = 0x00D0;
}

/// 最短 802.11 头（ACK/CTS）
pub const HDR_MIN_LEN: usize = 10;
/// seq_ctrl 在 3 地址头中的偏移
const SEQ_CTRL_OFF: usize = 22;
/// addr1 在头中的偏移
const ADDR1_OFF: usize = 4;

/// 从帧取 frame_control（前 2 字节，little-endian）
#[inline]
pub fn frame_control(buf: &[u8]) -> Option<u16> {
    match buf {
        [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
        _ => None,
    }
}

/// 是否管理帧
#[inline]
pub fn is_mgmt(fc: u16) -> bool {
    (fc & fc::FTYPE) == fc::TYPE_MGMT
}

/// 是否控制帧
#[inline]
pub fn is_ctl(fc: u16) -> bool {
    (fc & fc::FTYPE) == fc::TYPE_CTL
}

/// 是否数据帧
#[inline]
pub fn is_data(fc: u16) -> bool {
    (fc & fc::FTYPE) == fc::TYPE_DATA
}

/// 是否 QoS 数据帧
#[inline]
pub fn is_data_qos(fc: u16) -> bool {
    is_data(fc) && (fc & fc::SUBTYPE_QOS_DATA) != 0
}

/// 是否 Beacon
#[inline]
pub fn is_beacon(fc: u16) -> bool {
    is_mgmt(fc) && (fc & fc::STYPE) == fc::SUBTYPE_BEACON
}

/// 是否 Probe Response
#[inline]
pub fn is_probe_resp(fc: u16) -> bool {
    is_mgmt(fc) && (fc & fc::STYPE) == fc::SUBTYPE_PROBE_RESP
}

/// Protected Frame 位
#[inline]
pub fn has_protected(fc: u16) -> bool {
    (fc & fc::PROTECTED) != 0
}

/// ToDS 与 FromDS 同时置位时带 addr4
#[inline]
pub fn has_a4(fc: u16) -> bool {
    (fc & (fc::TODS | fc::FROMDS)) == (fc::TODS | fc::FROMDS)
}

/// 802.11 头长度（对应 ieee80211_hdrlen）
pub fn hdrlen(fc: u16) -> usize {
    if is_data(fc) {
        let mut len = if has_a4(fc) { 30 } else { 24 };
        if is_data_qos(fc) {
            len += 2;
            if (fc & fc::ORDER) != 0 {
                len += 4;
            }
        }
        return len;
    }
    if is_mgmt(fc) {
        return if (fc & fc::ORDER) != 0 { 28 } else { 24 };
    }
    if is_ctl(fc) {
        // CTS 与 ACK 只有 addr1
        let stype = fc & fc::STYPE;
        return if stype == fc::SUBTYPE_CTS || stype == fc::SUBTYPE_ACK {
            HDR_MIN_LEN
        } else {
            16
        };
    }
    24
}

/// 取 seq_ctrl（3 地址头之后才有）
#[inline]
pub fn seq_ctrl(buf: &[u8]) -> Option<u16> {
    let b = buf.get(SEQ_CTRL_OFF..SEQ_CTRL_OFF + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

/// 对应 IEEE80211_SEQ_TO_SN
#[inline]
pub fn seq_to_sn(seq: u16) -> u16 {
    (seq & 0xFFF0) >> 4
}

/// 取 addr1（接收方地址）
#[inline]
pub fn addr1(buf: &[u8]) -> Option<&[u8]> {
    buf.get(ADDR1_OFF..ADDR1_OFF + 6)
}

/// 组播/广播地址（对应 is_multicast_ether_addr）
#[inline]
pub fn is_multicast_ether_addr(addr: &[u8]) -> bool {
    addr.first().is_some_and(|b| b & 0x01 != 0)
}
