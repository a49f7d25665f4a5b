//! WCN36xx 无线驱动上下文
//!
//! 整合收发描述符路径：
//! - wcn36xx: 描述符编解码、RX/TX 路径、调试日志、配置文件
//! - skb: 包缓冲
//! - ieee80211: 802.11 类型与接收状态
//!
//! [`Wcn36xx`] 持有当前信道、当前虚拟接口与配置，每帧取一次快照后调用无锁的核心路径，
//! 并维护 net_device 风格的统计。

#![no_std]

extern crate alloc;

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use axerrno::AxResult;
use ieee80211::Channel;
use skb::SkBuff;
use spin::{Mutex, RwLock};

pub use ieee80211;
pub use skb;
pub use wcn36xx;

use wcn36xx::{Ieee80211Rx, TxRxError, VifContext, Wcn36xxConf};

/// 收发统计（对应 struct net_device_stats 的收发部分）
#[derive(Debug, Default)]
pub struct NetDeviceStats {
    pub rx_packets: AtomicU32,
    pub rx_bytes: AtomicU64,
    pub rx_dropped: AtomicU32,
    pub tx_packets: AtomicU32,
    pub tx_bytes: AtomicU64,
    pub tx_errors: AtomicU32,
}

/// [`NetDeviceStats`] 某一时刻的值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetDeviceStatsSnapshot {
    pub rx_packets: u32,
    pub rx_bytes: u64,
    pub rx_dropped: u32,
    pub tx_packets: u32,
    pub tx_bytes: u64,
    pub tx_errors: u32,
}

impl NetDeviceStats {
    pub fn snapshot(&self) -> NetDeviceStatsSnapshot {
        NetDeviceStatsSnapshot {
            rx_packets: self.rx_packets.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            rx_dropped: self.rx_dropped.load(Ordering::Relaxed),
            tx_packets: self.tx_packets.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
            tx_errors: self.tx_errors.load(Ordering::Relaxed),
        }
    }
}

/// 驱动上下文：当前信道 + 当前 VIF + 接收投递出口
pub struct Wcn36xx<R: Ieee80211Rx> {
    channel: RwLock<Option<Channel>>,
    vif: RwLock<Option<VifContext>>,
    sink: Mutex<R>,
    conf: Wcn36xxConf,
    pub stats: NetDeviceStats,
}

impl<R: Ieee80211Rx> Wcn36xx<R> {
    /// 创建上下文并应用配置中的调试掩码
    pub fn new(conf: Wcn36xxConf, sink: R) -> Self {
        wcn36xx::set_debug_mask(conf.debug_mask);
        log::info!(
            target: "wireless",
            "wcn36xx: init debug_mask {:#010x} unknown_frame_policy {:?}",
            conf.debug_mask,
            conf.unknown_frame_policy
        );
        Self {
            channel: RwLock::new(None),
            vif: RwLock::new(None),
            sink: Mutex::new(sink),
            conf,
            stats: NetDeviceStats::default(),
        }
    }

    pub fn conf(&self) -> &Wcn36xxConf {
        &self.conf
    }

    /// 切换当前信道（None 表示未调谐）
    pub fn set_channel(&self, channel: Option<Channel>) {
        log::info!(target: "wireless", "wcn36xx: channel {:?}", channel);
        *self.channel.write() = channel;
    }

    pub fn channel(&self) -> Option<Channel> {
        *self.channel.read()
    }

    /// 设置或清除活动虚拟接口
    pub fn set_vif(&self, vif: Option<VifContext>) {
        log::info!(target: "wireless", "wcn36xx: vif {:?}", vif);
        *self.vif.write() = vif;
    }

    pub fn vif(&self) -> Option<VifContext> {
        *self.vif.read()
    }

    /// 处理一个接收缓冲；失败时丢弃并计入 rx_dropped
    pub fn rx(&self, skb: SkBuff) -> AxResult<()> {
        let res = match self.channel() {
            Some(channel) => {
                let mut sink = self.sink.lock();
                let mut delivered = 0usize;
                let res = wcn36xx::rx_skb(
                    &mut |skb: SkBuff| {
                        delivered = skb.len();
                        sink.rx_ni(skb)
                    },
                    &channel,
                    skb,
                );
                res.map(|()| delivered)
            }
            None => Err(TxRxError::NoChannel),
        };
        match res {
            Ok(len) => {
                self.stats.rx_packets.fetch_add(1, Ordering::Relaxed);
                self.stats.rx_bytes.fetch_add(len as u64, Ordering::Relaxed);
                Ok(())
            }
            Err(e) => {
                self.stats.rx_dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!(target: "wireless::wcn36xx::rx", "rx dropped: {}", e);
                Err(e.into())
            }
        }
    }

    /// 为待发帧生成 TX BD，返回可交给 DMA 的缓冲
    pub fn tx(&self, skb: SkBuff, encrypt: bool, tx_compl: bool) -> AxResult<SkBuff> {
        let res = match self.vif() {
            Some(vif) => wcn36xx::tx_skb(
                skb,
                &vif,
                encrypt,
                tx_compl,
                self.conf.unknown_frame_policy,
            ),
            None => Err(TxRxError::NoVif),
        };
        match res {
            Ok(out) => {
                self.stats.tx_packets.fetch_add(1, Ordering::Relaxed);
                self.stats.tx_bytes.fetch_add(out.len() as u64, Ordering::Relaxed);
                Ok(out)
            }
            Err(e) => {
                self.stats.tx_errors.fetch_add(1, Ordering::Relaxed);
                log::warn!(target: "wireless::wcn36xx::tx", "tx failed: {}", e);
                Err(e.into())
            }
        }
    }
}

/// 从配置文件创建驱动上下文；未调谐、无 VIF
pub fn wireless_driver_init<R: Ieee80211Rx>(cfg: &[u8], sink: R) -> AxResult<Wcn36xx<R>> {
    let mut conf = Wcn36xxConf::default();
    wcn36xx::parse_configfile(cfg, &mut conf)?;
    Ok(Wcn36xx::new(conf, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use axerrno::AxError;
    use wcn36xx::{RxBd, TxBd, UnknownFramePolicy, RX_BD_SIZE, TX_BD_SIZE};

    #[derive(Default)]
    struct Collect(Vec<SkBuff>);

    impl Ieee80211Rx for Collect {
        fn rx_ni(&mut self, skb: SkBuff) {
            self.0.push(skb);
        }
    }

    fn rx_buffer(frame: &[u8], rssi_raw: u8) -> SkBuff {
        let mut bd = RxBd {
            phy_stat0: (rssi_raw as u32) << 24,
            ..RxBd::default()
        };
        bd.pdu.mpdu_header_off = RX_BD_SIZE as u8;
        bd.pdu.mpdu_len = frame.len() as u16;
        let mut skb = SkBuff::alloc(RX_BD_SIZE + frame.len() + 16);
        let area = skb.data_mut();
        area[..RX_BD_SIZE].copy_from_slice(&bd.to_wire());
        area[RX_BD_SIZE..RX_BD_SIZE + frame.len()].copy_from_slice(frame);
        skb
    }

    #[test]
    fn rx_needs_channel() {
        let drv = Wcn36xx::new(Wcn36xxConf::default(), Collect::default());
        let frame = [0x80u8, 0x00, 0, 0];
        assert_eq!(drv.rx(rx_buffer(&frame, 0x50)), Err(AxError::BadState));
        assert_eq!(drv.stats.snapshot().rx_dropped, 1);
        assert!(drv.sink.lock().0.is_empty());
    }

    #[test]
    fn rx_delivers_and_counts() {
        let drv = Wcn36xx::new(Wcn36xxConf::default(), Collect::default());
        drv.set_channel(Some(Channel::new_5g(5180, 36)));
        let frame: Vec<u8> = (0..40u8).collect();
        drv.rx(rx_buffer(&frame, 0x30)).unwrap();

        let stats = drv.stats.snapshot();
        assert_eq!(stats.rx_packets, 1);
        assert_eq!(stats.rx_bytes, 40);
        let sink = drv.sink.lock();
        assert_eq!(sink.0[0].data(), &frame[..]);
        assert_eq!(sink.0[0].rx_status().freq, 5180);
        assert_eq!(sink.0[0].rx_status().signal, -52);
    }

    #[test]
    fn rx_bad_geometry_is_dropped() {
        let drv = Wcn36xx::new(Wcn36xxConf::default(), Collect::default());
        drv.set_channel(Some(Channel::new_2g(2412, 1)));
        let mut skb = rx_buffer(&[0u8; 8], 0x50);
        let mut bd = RxBd::decode(skb.raw()).unwrap();
        bd.pdu.mpdu_header_off = 8;
        skb.data_mut()[..RX_BD_SIZE].copy_from_slice(&bd.to_wire());

        assert_eq!(drv.rx(skb), Err(AxError::InvalidData));
        assert_eq!(drv.stats.snapshot().rx_dropped, 1);
        assert_eq!(drv.stats.snapshot().rx_packets, 0);
    }

    #[test]
    fn tx_uses_active_vif() {
        let drv = Wcn36xx::new(Wcn36xxConf::default(), Collect::default());
        let mut frame = vec![0u8; 32];
        frame[..2].copy_from_slice(&0x0008u16.to_le_bytes());
        assert_eq!(
            drv.tx(SkBuff::from_payload(&frame, TX_BD_SIZE), false, false)
                .map(|s| s.len()),
            Err(AxError::BadState)
        );

        drv.set_vif(Some(VifContext {
            sta_index: 4,
            dpu_desc_index: 5,
        }));
        let out = drv
            .tx(SkBuff::from_payload(&frame, TX_BD_SIZE), true, true)
            .unwrap();
        let (bd, _) = TxBd::decode(&out).unwrap();
        assert_eq!(bd.sta_index, 4);
        assert_eq!(bd.dpu_desc_idx, 5);
        assert!(bd.dpu_ne);
        assert!(bd.tx_comp);

        let stats = drv.stats.snapshot();
        assert_eq!(stats.tx_packets, 1);
        assert_eq!(stats.tx_bytes, (TX_BD_SIZE + 32) as u64);
        assert_eq!(stats.tx_errors, 1);
    }

    #[test]
    fn init_from_configfile() {
        let drv = wireless_driver_init(b"UNKNOWN_FRAME_POLICY=reject\n", Collect::default())
            .unwrap();
        assert_eq!(drv.conf().unknown_frame_policy, UnknownFramePolicy::Reject);
        drv.set_vif(Some(VifContext::default()));

        let mut frame = vec![0u8; 24];
        frame[..2].copy_from_slice(&0x000cu16.to_le_bytes());
        assert_eq!(
            drv.tx(SkBuff::from_payload(&frame, TX_BD_SIZE), false, false)
                .map(|s| s.len()),
            Err(AxError::InvalidInput)
        );
        assert!(wireless_driver_init(b"DEBUG_MASK=nope\n", Collect::default()).is_err());
    }
}
