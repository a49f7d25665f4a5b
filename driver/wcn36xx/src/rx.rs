//! 接收路径：RX BD → 接收状态 + 802.11 帧
//!
//! 缓冲开头是 RX BD，帧从 `mpdu_header_off` 开始、长 `mpdu_len`。处理后 skb 只剩 802.11 帧，
//! 接收状态写进 skb 的侧通道，然后交给协议栈。

use ieee80211::ieee80211::{frame_control, is_beacon, seq_ctrl, seq_to_sn};
use ieee80211::{rx_flag, Channel, RxStatus};
use skb::SkBuff;

use crate::debug::{dbg_dump, dbg_mask, wcn_dbg};
use crate::error::{TxRxError, TxRxResult};
use crate::rx_bd::{RxBd, RX_BD_SIZE};
use crate::txrxif::Ieee80211Rx;

/// 硬件不提供逐帧时间戳，固定填 10
pub const RX_MACTIME: u64 = 10;
/// 天线与速率索引暂不由硬件逐帧上报
pub const RX_ANTENNA: u8 = 1;
pub const RX_RATE_IDX: u8 = 1;

/// 由 RX BD 与当前信道生成接收状态
///
/// 硬件在交给主机前已去掉 IV/MIC 并完成解密。
pub fn rx_status_from_bd(bd: &RxBd, channel: &Channel) -> RxStatus {
    RxStatus {
        mactime: RX_MACTIME,
        signal: bd.signal(),
        antenna: RX_ANTENNA,
        rate_idx: RX_RATE_IDX,
        flag: rx_flag::IV_STRIPPED | rx_flag::MMIC_STRIPPED | rx_flag::DECRYPTED,
        rx_flags: 0,
        ..RxStatus::on_channel(channel)
    }
}

/// 校验 RX BD 给出的帧几何，返回 (header_off, 帧结束位置)
fn rx_geometry(bd: &RxBd, capacity: usize) -> TxRxResult<(usize, usize)> {
    let header_off = bd.pdu.mpdu_header_off as usize;
    if header_off < RX_BD_SIZE {
        return Err(TxRxError::HeaderOffset { off: header_off });
    }
    let end = header_off + bd.pdu.mpdu_len as usize;
    if end > capacity {
        return Err(TxRxError::FrameOverflow { end, capacity });
    }
    Ok((header_off, end))
}

/// 处理一个接收缓冲并交给协议栈
///
/// `skb` 的 data 起点是 RX BD；硬件写入的字节可以还在 tailroom 里（len 为 0）。
/// 几何不合法时丢弃 skb 并返回错误，协议栈不会收到该帧。
pub fn rx_skb<R: Ieee80211Rx + ?Sized>(
    sink: &mut R,
    channel: &Channel,
    mut skb: SkBuff,
) -> TxRxResult<()> {
    let bd = RxBd::decode(skb.raw())?;
    let capacity = skb.len() + skb.tailroom();
    let (header_off, end) = rx_geometry(&bd, capacity)?;

    if end > skb.len() {
        let grow = end - skb.len();
        skb.put(grow)
            .ok_or(TxRxError::FrameOverflow { end, capacity })?;
    } else {
        skb.trim(end);
    }
    skb.pull(header_off)
        .ok_or(TxRxError::HeaderOffset { off: header_off })?;

    let status = rx_status_from_bd(&bd, channel);
    wcn_dbg!(
        dbg_mask::RX,
        "status.flags={:x} signal={} rate_id={} rx_ch={}",
        status.flag,
        status.signal,
        bd.rate_id,
        bd.rx_ch
    );
    skb.set_rx_status(status);

    let fc = frame_control(skb.data()).unwrap_or(0);
    let sn = seq_ctrl(skb.data()).map(seq_to_sn).unwrap_or(0);
    if skb.len() >= 2 && is_beacon(fc) {
        wcn_dbg!(
            dbg_mask::BEACON,
            "beacon skb len {} fc {:04x} sn {}",
            skb.len(),
            fc,
            sn
        );
        dbg_dump(dbg_mask::BEACON_DUMP, "SKB <<< ", skb.data());
    } else {
        wcn_dbg!(dbg_mask::RX, "rx skb len {} fc {:04x} sn {}", skb.len(), fc, sn);
        dbg_dump(dbg_mask::RX_DUMP, "SKB <<< ", skb.data());
    }

    sink.rx_ni(skb);
    Ok(())
}
