//! 发送路径：为待发帧生成 TX BD
//!
//! 两步：[`prepare_tx_bd`] 清零并写帧几何，[`fill_tx_bd`] 按帧类别选择工作队列、速率与 ACK 策略，
//! 写入当前虚拟接口的索引，最后转换成线上字节并写签名。[`tx_skb`] 把两步串起来并把描述符
//! 放进 skb 的 headroom。

use ieee80211::ieee80211::{
    addr1, frame_control, hdrlen, is_ctl, is_data, is_mgmt, is_multicast_ether_addr,
};
use skb::SkBuff;

use crate::bd::{MPDU_DATA_OFF_MAX, MPDU_HEADER_MAX, MPDU_LEN_MAX};
use crate::debug::{dbg_dump, dbg_mask, wcn_dbg};
use crate::error::{TxRxError, TxRxResult};
use crate::tx_bd::{
    TxBd, ACK_POLICY_ACK, ACK_POLICY_NO_ACK, TX_BD_RESERVED3, TX_BD_SIZE, WCN36XX_BD_RATE_CTRL,
    WCN36XX_BD_RATE_DATA, WCN36XX_BD_RATE_MGMT, WCN36XX_BMU_WQ_TX, WCN36XX_TID,
    WCN36XX_TX_B_WQ_ID, WCN36XX_TX_U_WQ_ID,
};

/// 当前虚拟接口在固件中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VifContext {
    pub sta_index: u8,
    pub dpu_desc_index: u8,
}

/// 每帧发送参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxBdParams {
    pub broadcast: bool,
    pub encrypt: bool,
    /// 请求发送完成指示
    pub tx_compl: bool,
}

/// 单播帧类型无法识别时的处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFramePolicy {
    /// 告警后照常生成描述符，速率保持清零后的 0
    #[default]
    Warn,
    /// 告警并返回 [`TxRxError::UnknownFrameType`]
    Reject,
}

fn check_field(field: &'static str, value: usize, max: usize) -> TxRxResult<()> {
    if value > max {
        return Err(TxRxError::FieldOverflow { field, value });
    }
    Ok(())
}

/// 清零描述符并写入帧几何：MAC 头紧跟描述符，帧体紧跟 MAC 头
pub fn prepare_tx_bd(bd: &mut TxBd, len: usize, header_len: usize) -> TxRxResult<()> {
    check_field("mpdu_len", len, MPDU_LEN_MAX)?;
    check_field("mpdu_header_len", header_len, MPDU_HEADER_MAX.min(len))?;
    let data_off = TX_BD_SIZE + header_len;
    check_field("mpdu_data_off", data_off, MPDU_DATA_OFF_MAX)?;

    *bd = TxBd::default();
    bd.pdu.mpdu_header_len = header_len as u8;
    bd.pdu.mpdu_header_off = TX_BD_SIZE as u8;
    bd.pdu.mpdu_data_off = data_off as u16;
    bd.pdu.mpdu_len = len as u16;
    Ok(())
}

/// 填写路由、速率与 ACK 策略并输出线上字节
///
/// `hdr` 是帧的 802.11 头（至少含 frame_control）。
pub fn fill_tx_bd(
    bd: &mut TxBd,
    vif: &VifContext,
    params: TxBdParams,
    hdr: &[u8],
    policy: UnknownFramePolicy,
) -> TxRxResult<[u8; TX_BD_SIZE]> {
    let fc = frame_control(hdr).ok_or(TxRxError::ShortHeader { len: hdr.len() })?;

    bd.dpu_rf = WCN36XX_BMU_WQ_TX;
    bd.pdu.tid = WCN36XX_TID;
    bd.pdu.reserved3 = TX_BD_RESERVED3;

    if params.broadcast {
        bd.ub = true;
        bd.queue_id = WCN36XX_TX_B_WQ_ID;
        // 广播用默认速率，链路层不回 ACK
        bd.bd_rate = 0;
        bd.ack_policy = ACK_POLICY_NO_ACK;
    } else {
        bd.queue_id = WCN36XX_TX_U_WQ_ID;
        bd.ack_policy = ACK_POLICY_ACK;
        if is_data(fc) {
            bd.bd_rate = WCN36XX_BD_RATE_DATA;
        } else if is_mgmt(fc) {
            bd.bd_rate = WCN36XX_BD_RATE_MGMT;
        } else if is_ctl(fc) {
            bd.bd_rate = WCN36XX_BD_RATE_CTRL;
        } else {
            log::warn!(target: "wireless::wcn36xx::tx", "frame control type unknown: fc {:04x}", fc);
            if policy == UnknownFramePolicy::Reject {
                return Err(TxRxError::UnknownFrameType { fc });
            }
        }
    }

    bd.sta_index = vif.sta_index;
    bd.dpu_desc_idx = vif.dpu_desc_index;

    bd.dpu_ne = params.encrypt;
    bd.tx_comp = params.tx_compl;

    Ok(bd.to_wire())
}

/// 为 skb 中的 802.11 帧生成 TX BD 并放到帧前
///
/// 头长度由 frame_control 推出，addr1 为组播地址时按广播发送。skb 需要至少
/// [`TX_BD_SIZE`] 字节 headroom。
pub fn tx_skb(
    mut skb: SkBuff,
    vif: &VifContext,
    encrypt: bool,
    tx_compl: bool,
    policy: UnknownFramePolicy,
) -> TxRxResult<SkBuff> {
    let fc = frame_control(skb.data()).ok_or(TxRxError::ShortHeader { len: skb.len() })?;
    let header_len = hdrlen(fc);
    let broadcast = addr1(skb.data()).is_some_and(is_multicast_ether_addr);
    let params = TxBdParams {
        broadcast,
        encrypt,
        tx_compl,
    };

    let mut bd = TxBd::default();
    prepare_tx_bd(&mut bd, skb.len(), header_len)?;
    let wire = fill_tx_bd(&mut bd, vif, params, skb.data(), policy)?;

    wcn_dbg!(
        dbg_mask::TX,
        "tx skb len {} fc {:04x} bcast {} encrypt {} sta {} rate {}",
        skb.len(),
        fc,
        broadcast,
        encrypt,
        vif.sta_index,
        bd.bd_rate
    );
    dbg_dump(dbg_mask::TX_DUMP, "SKB >>> ", skb.data());

    let have = skb.headroom();
    let dst = skb.push(TX_BD_SIZE).ok_or(TxRxError::NoHeadroom {
        need: TX_BD_SIZE,
        have,
    })?;
    dst.copy_from_slice(&wire);
    Ok(skb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const VIF: VifContext = VifContext {
        sta_index: 3,
        dpu_desc_index: 9,
    };

    fn hdr(fc: u16) -> [u8; 24] {
        let mut h = [0u8; 24];
        h[..2].copy_from_slice(&fc.to_le_bytes());
        h
    }

    fn build(fc: u16, params: TxBdParams, policy: UnknownFramePolicy) -> TxRxResult<TxBd> {
        let mut bd = TxBd::default();
        prepare_tx_bd(&mut bd, 100, 24)?;
        let wire = fill_tx_bd(&mut bd, &VIF, params, &hdr(fc), policy)?;
        let (decoded, _) = TxBd::decode(&wire)?;
        assert_eq!(decoded, bd);
        Ok(bd)
    }

    #[test]
    fn geometry_follows_descriptor() {
        let mut bd = TxBd {
            sta_index: 0xff,
            ..TxBd::default()
        };
        prepare_tx_bd(&mut bd, 1500, 26).unwrap();
        assert_eq!(bd.pdu.mpdu_header_off as usize, TX_BD_SIZE);
        assert_eq!(bd.pdu.mpdu_header_len, 26);
        assert_eq!(
            bd.pdu.mpdu_data_off,
            bd.pdu.mpdu_header_off as u16 + bd.pdu.mpdu_header_len as u16
        );
        assert_eq!(bd.pdu.mpdu_len, 1500);
        assert_eq!(bd.sta_index, 0);
    }

    #[test]
    fn geometry_rejects_values_wider_than_fields() {
        let mut bd = TxBd::default();
        assert_eq!(
            prepare_tx_bd(&mut bd, 0x1_0000, 24),
            Err(TxRxError::FieldOverflow {
                field: "mpdu_len",
                value: 0x1_0000
            })
        );
        assert_eq!(
            prepare_tx_bd(&mut bd, 10, 24),
            Err(TxRxError::FieldOverflow {
                field: "mpdu_header_len",
                value: 24
            })
        );
        assert!(prepare_tx_bd(&mut bd, 4000, 256).is_err());
    }

    #[test]
    fn broadcast_never_expects_ack() {
        for encrypt in [false, true] {
            let params = TxBdParams {
                broadcast: true,
                encrypt,
                tx_compl: false,
            };
            for fc in [0x0008, 0x0080, 0x00d4] {
                let bd = build(fc, params, UnknownFramePolicy::Warn).unwrap();
                assert_eq!(bd.ack_policy, ACK_POLICY_NO_ACK);
                assert_eq!(bd.bd_rate, 0);
                assert_eq!(bd.queue_id, WCN36XX_TX_B_WQ_ID);
                assert!(bd.ub);
                assert_eq!(bd.dpu_ne, encrypt);
            }
        }
    }

    #[test]
    fn unicast_rate_follows_frame_class() {
        let params = TxBdParams::default();
        for (fc, rate) in [
            (0x0008, WCN36XX_BD_RATE_DATA),
            (0x0088, WCN36XX_BD_RATE_DATA),
            (0x00b0, WCN36XX_BD_RATE_MGMT),
            (0x00b4, WCN36XX_BD_RATE_CTRL),
        ] {
            let bd = build(fc, params, UnknownFramePolicy::Warn).unwrap();
            assert_eq!(bd.bd_rate, rate, "fc {:04x}", fc);
            assert_eq!(bd.ack_policy, ACK_POLICY_ACK);
            assert_eq!(bd.queue_id, WCN36XX_TX_U_WQ_ID);
            assert!(!bd.ub);
        }
    }

    #[test]
    fn fixed_fields_and_vif_indices() {
        let params = TxBdParams {
            broadcast: false,
            encrypt: true,
            tx_compl: true,
        };
        let bd = build(0x0008, params, UnknownFramePolicy::Warn).unwrap();
        assert_eq!(bd.dpu_rf, WCN36XX_BMU_WQ_TX);
        assert_eq!(bd.pdu.tid, WCN36XX_TID);
        assert_eq!(bd.pdu.reserved3, 0xd);
        assert_eq!(bd.sta_index, 3);
        assert_eq!(bd.dpu_desc_idx, 9);
        assert!(bd.dpu_ne);
        assert!(bd.tx_comp);
    }

    #[test]
    fn unknown_frame_type_follows_policy() {
        let params = TxBdParams::default();
        let bd = build(0x000c, params, UnknownFramePolicy::Warn).unwrap();
        assert_eq!(bd.bd_rate, 0);
        assert_eq!(bd.ack_policy, ACK_POLICY_ACK);
        assert_eq!(
            build(0x000c, params, UnknownFramePolicy::Reject),
            Err(TxRxError::UnknownFrameType { fc: 0x000c })
        );
    }

    #[test]
    fn signature_is_last_and_byte_order_independent() {
        let mut bd = TxBd::default();
        prepare_tx_bd(&mut bd, 60, 24).unwrap();
        let wire = fill_tx_bd(
            &mut bd,
            &VIF,
            TxBdParams::default(),
            &hdr(0x0008),
            UnknownFramePolicy::Warn,
        )
        .unwrap();
        assert_eq!(&wire[24..28], &[0xbd; 4]);
        // 字 2 在线上是大端：data_off=64, header_off=40, header_len=24
        assert_eq!(&wire[8..12], &[0x00, 0x40, 0x28, 0x18]);
    }

    #[test]
    fn short_header_is_rejected() {
        let mut bd = TxBd::default();
        assert_eq!(
            fill_tx_bd(
                &mut bd,
                &VIF,
                TxBdParams::default(),
                &[0x08],
                UnknownFramePolicy::Warn
            ),
            Err(TxRxError::ShortHeader { len: 1 })
        );
    }

    #[test]
    fn tx_skb_prepends_descriptor() {
        let mut frame = vec![0u8; 60];
        frame[..2].copy_from_slice(&0x0088u16.to_le_bytes());
        frame[4..10].copy_from_slice(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        let skb = SkBuff::from_payload(&frame, TX_BD_SIZE + 8);

        let out = tx_skb(skb, &VIF, true, false, UnknownFramePolicy::Warn).unwrap();
        assert_eq!(out.len(), TX_BD_SIZE + 60);
        assert_eq!(&out[TX_BD_SIZE..], &frame[..]);
        let (bd, sign) = TxBd::decode(&out).unwrap();
        assert_eq!(sign, 0xbdbd_bdbd);
        assert_eq!(bd.pdu.mpdu_header_len, 26);
        assert_eq!(bd.pdu.mpdu_len, 60);
        assert!(!bd.ub);
        assert!(bd.dpu_ne);
        assert_eq!(bd.bd_rate, WCN36XX_BD_RATE_DATA);
    }

    #[test]
    fn tx_skb_group_address_goes_broadcast() {
        let mut frame: Vec<u8> = vec![0u8; 24];
        frame[..2].copy_from_slice(&0x0080u16.to_le_bytes());
        frame[4..10].copy_from_slice(&[0xff; 6]);
        let skb = SkBuff::from_payload(&frame, TX_BD_SIZE);

        let out = tx_skb(skb, &VIF, false, true, UnknownFramePolicy::Warn).unwrap();
        let (bd, _) = TxBd::decode(&out).unwrap();
        assert!(bd.ub);
        assert_eq!(bd.queue_id, WCN36XX_TX_B_WQ_ID);
        assert_eq!(bd.ack_policy, ACK_POLICY_NO_ACK);
        assert!(bd.tx_comp);
        assert_eq!(out.headroom(), 0);
    }

    #[test]
    fn tx_skb_without_headroom_fails() {
        let frame = hdr(0x0008);
        let skb = SkBuff::from_payload(&frame, TX_BD_SIZE - 1);
        assert_eq!(
            tx_skb(skb, &VIF, false, false, UnknownFramePolicy::Warn).map(|s| s.len()),
            Err(TxRxError::NoHeadroom {
                need: TX_BD_SIZE,
                have: TX_BD_SIZE - 1
            })
        );
    }
}
