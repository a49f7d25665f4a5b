//! TX 缓冲描述符
//!
//! 40 字节（10 字），紧贴在待发 802.11 帧之前。第 6 字是固定签名 `0xbdbdbdbd`，
//! 在整块描述符完成字节序转换之后才写入。

use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::bd::{buff_to_be, load_words, store_words, Pdu, PDU_WORDS};
use crate::error::{TxRxError, TxRxResult};

/// TX BD 字数
pub const TX_BD_WORDS: usize = 10;
/// TX BD 字节数
pub const TX_BD_SIZE: usize = TX_BD_WORDS * 4;

/// 签名所在字
pub const TX_BD_SIGN_WORD: usize = 6;
/// 签名值，四个字节相同，交换字节序后不变
pub const TX_BD_SIGN: u32 = 0xbdbd_bdbd;

/// BMU 发送工作队列标签（dpu_rf）
pub const WCN36XX_BMU_WQ_TX: u8 = 25;
/// 固定 TID
pub const WCN36XX_TID: u8 = 7;
/// reserved3 必须写入的值，固件未给出含义
pub const TX_BD_RESERVED3: u8 = 0xd;
/// 广播工作队列
pub const WCN36XX_TX_B_WQ_ID: u8 = 0xA;
/// 单播工作队列
pub const WCN36XX_TX_U_WQ_ID: u8 = 0x9;

/// bd_rate 速率类别
pub const WCN36XX_BD_RATE_DATA: u8 = 0;
pub const WCN36XX_BD_RATE_MGMT: u8 = 2;
pub const WCN36XX_BD_RATE_CTRL: u8 = 3;

/// ack_policy
pub const ACK_POLICY_ACK: u8 = 0;
pub const ACK_POLICY_NO_ACK: u8 = 1;

const W_FLAGS: usize = 0;
const W_PDU: usize = 1;
const W_ROUTE: usize = 5;
const W_DXE_START: usize = 8;
const W_DXE_END: usize = 9;

register_bitfields![u32,
    TxBd0 [
        BDT OFFSET(30) NUMBITS(2) [],
        FT OFFSET(29) NUMBITS(1) [],
        DPU_NE OFFSET(28) NUMBITS(1) [],
        FW_TX_COMP OFFSET(27) NUMBITS(1) [],
        TX_COMP OFFSET(26) NUMBITS(1) [],
        UB OFFSET(24) NUMBITS(1) [],
        RMF OFFSET(23) NUMBITS(1) [],
        DPU_SIGN OFFSET(8) NUMBITS(3) [],
        DPU_RF OFFSET(0) NUMBITS(8) []
    ],
    TxBd5 [
        QUEUE_ID OFFSET(20) NUMBITS(5) [],
        BD_RATE OFFSET(18) NUMBITS(2) [],
        ACK_POLICY OFFSET(16) NUMBITS(2) [],
        STA_INDEX OFFSET(8) NUMBITS(8) [],
        DPU_DESC_IDX OFFSET(0) NUMBITS(8) []
    ]
];

/// TX BD（主机序字段）；`Default` 即全 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxBd {
    pub bdt: u8,
    pub ft: bool,
    /// 1 = 不经 DPU 加密
    pub dpu_ne: bool,
    pub fw_tx_comp: bool,
    /// 请求发送完成指示
    pub tx_comp: bool,
    /// 广播
    pub ub: bool,
    pub rmf: bool,
    pub dpu_sign: u8,
    /// 工作队列标签
    pub dpu_rf: u8,

    pub pdu: Pdu,

    pub queue_id: u8,
    pub bd_rate: u8,
    pub ack_policy: u8,
    pub sta_index: u8,
    pub dpu_desc_idx: u8,

    pub dxe_start_time: u32,
    pub dxe_end_time: u32,
}

impl TxBd {
    fn to_host_words(&self) -> [u32; TX_BD_WORDS] {
        let mut w = [0u32; TX_BD_WORDS];

        let mut w0 = LocalRegisterCopy::<u32, TxBd0::Register>::new(0);
        w0.write(
            TxBd0::BDT.val(self.bdt as u32)
                + TxBd0::FT.val(self.ft as u32)
                + TxBd0::DPU_NE.val(self.dpu_ne as u32)
                + TxBd0::FW_TX_COMP.val(self.fw_tx_comp as u32)
                + TxBd0::TX_COMP.val(self.tx_comp as u32)
                + TxBd0::UB.val(self.ub as u32)
                + TxBd0::RMF.val(self.rmf as u32)
                + TxBd0::DPU_SIGN.val(self.dpu_sign as u32)
                + TxBd0::DPU_RF.val(self.dpu_rf as u32),
        );
        w[W_FLAGS] = w0.get();
        w[W_PDU..W_PDU + PDU_WORDS].copy_from_slice(&self.pdu.to_words());

        let mut w5 = LocalRegisterCopy::<u32, TxBd5::Register>::new(0);
        w5.write(
            TxBd5::QUEUE_ID.val(self.queue_id as u32)
                + TxBd5::BD_RATE.val(self.bd_rate as u32)
                + TxBd5::ACK_POLICY.val(self.ack_policy as u32)
                + TxBd5::STA_INDEX.val(self.sta_index as u32)
                + TxBd5::DPU_DESC_IDX.val(self.dpu_desc_idx as u32),
        );
        w[W_ROUTE] = w5.get();
        w[W_DXE_START] = self.dxe_start_time;
        w[W_DXE_END] = self.dxe_end_time;
        w
    }

    fn from_host_words(w: &[u32; TX_BD_WORDS]) -> Self {
        let w0 = LocalRegisterCopy::<u32, TxBd0::Register>::new(w[W_FLAGS]);
        let w5 = LocalRegisterCopy::<u32, TxBd5::Register>::new(w[W_ROUTE]);
        let mut pdu = [0u32; PDU_WORDS];
        pdu.copy_from_slice(&w[W_PDU..W_PDU + PDU_WORDS]);
        Self {
            bdt: w0.read(TxBd0::BDT) as u8,
            ft: w0.is_set(TxBd0::FT),
            dpu_ne: w0.is_set(TxBd0::DPU_NE),
            fw_tx_comp: w0.is_set(TxBd0::FW_TX_COMP),
            tx_comp: w0.is_set(TxBd0::TX_COMP),
            ub: w0.is_set(TxBd0::UB),
            rmf: w0.is_set(TxBd0::RMF),
            dpu_sign: w0.read(TxBd0::DPU_SIGN) as u8,
            dpu_rf: w0.read(TxBd0::DPU_RF) as u8,
            pdu: Pdu::from_words(&pdu),
            queue_id: w5.read(TxBd5::QUEUE_ID) as u8,
            bd_rate: w5.read(TxBd5::BD_RATE) as u8,
            ack_policy: w5.read(TxBd5::ACK_POLICY) as u8,
            sta_index: w5.read(TxBd5::STA_INDEX) as u8,
            dpu_desc_idx: w5.read(TxBd5::DPU_DESC_IDX) as u8,
            dxe_start_time: w[W_DXE_START],
            dxe_end_time: w[W_DXE_END],
        }
    }

    /// 生成线上字节：主机字 → `buff_to_be` → 写签名 → 按内存序输出
    pub fn to_wire(&self) -> [u8; TX_BD_SIZE] {
        let mut w = self.to_host_words();
        buff_to_be(&mut w);
        w[TX_BD_SIGN_WORD] = TX_BD_SIGN;
        let mut out = [0u8; TX_BD_SIZE];
        store_words(&w, &mut out);
        out
    }

    /// 从线上字节解码（诊断用），同时返回签名字
    pub fn decode(wire: &[u8]) -> TxRxResult<(Self, u32)> {
        let mut w: [u32; TX_BD_WORDS] = load_words(wire).ok_or(TxRxError::Truncated {
            need: TX_BD_SIZE,
            have: wire.len(),
        })?;
        let sign = w[TX_BD_SIGN_WORD];
        buff_to_be(&mut w);
        Ok((Self::from_host_words(&w), sign))
    }
}
