//! RX 缓冲描述符
//!
//! 固件把每个接收帧放在一个 76 字节（19 字）的 RX BD 之后，MAC 头从 `mpdu_header_off` 开始。

use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::bd::{buff_to_be, load_words, store_words, Pdu, PDU_WORDS};
use crate::error::{TxRxError, TxRxResult};

/// RX BD 字数
pub const RX_BD_WORDS: usize = 19;
/// RX BD 字节数
pub const RX_BD_SIZE: usize = RX_BD_WORDS * 4;

const W_FLAGS: usize = 0;
const W_PDU: usize = 1;
const W_ADDR: usize = 5;
const W_RATE: usize = 6;
const W_PHY_STAT0: usize = 7;
const W_PHY_STAT1: usize = 8;
const W_RX_TIMES: usize = 9;
const W_PMI_CMD: usize = 10;
const W_REORDER: usize = 16;
const W_SEQ: usize = 17;
const W_MSDU: usize = 18;

register_bitfields![u32,
    RxBd0 [
        BDT OFFSET(30) NUMBITS(2) [],
        FT OFFSET(29) NUMBITS(1) [],
        DPU_NE OFFSET(28) NUMBITS(1) [],
        RX_KEY_ID OFFSET(25) NUMBITS(3) [],
        UB OFFSET(24) NUMBITS(1) [],
        RMF OFFSET(23) NUMBITS(1) [],
        UMA_BYPASS OFFSET(22) NUMBITS(1) [],
        CSR11 OFFSET(21) NUMBITS(1) [],
        SCAN_LEARN OFFSET(19) NUMBITS(1) [],
        RX_CH OFFSET(15) NUMBITS(4) [],
        RTSF OFFSET(14) NUMBITS(1) [],
        BSF OFFSET(13) NUMBITS(1) [],
        A2HF OFFSET(12) NUMBITS(1) [],
        ST_AUF OFFSET(11) NUMBITS(1) [],
        DPU_SIGN OFFSET(8) NUMBITS(3) [],
        DPU_RF OFFSET(0) NUMBITS(8) []
    ],
    RxBd5 [
        ADDR3 OFFSET(24) NUMBITS(8) [],
        ADDR2 OFFSET(16) NUMBITS(8) [],
        ADDR1 OFFSET(8) NUMBITS(8) [],
        DPU_DESC_IDX OFFSET(0) NUMBITS(8) []
    ],
    RxBd6 [
        RXP_FLAGS OFFSET(9) NUMBITS(23) [],
        RATE_ID OFFSET(0) NUMBITS(9) []
    ],
    RxBd16 [
        REORDER_SLOT_ID OFFSET(22) NUMBITS(6) [],
        REORDER_FWD_ID OFFSET(16) NUMBITS(6) [],
        REORDER_CODE OFFSET(0) NUMBITS(4) []
    ],
    RxBd17 [
        EXP_SEQ_NUM OFFSET(20) NUMBITS(12) [],
        CUR_SEQ_NUM OFFSET(8) NUMBITS(12) [],
        FR_TYPE_SUBTYPE OFFSET(0) NUMBITS(8) []
    ],
    RxBd18 [
        MSDU_SIZE OFFSET(16) NUMBITS(16) [],
        SUB_FR_ID OFFSET(12) NUMBITS(4) [],
        PROC_ORDER OFFSET(8) NUMBITS(4) [],
        AEF OFFSET(3) NUMBITS(1) [],
        LSF OFFSET(2) NUMBITS(1) [],
        ESF OFFSET(1) NUMBITS(1) [],
        ASF OFFSET(0) NUMBITS(1) []
    ]
];

/// 解码后的 RX BD（主机序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxBd {
    pub bdt: u8,
    pub ft: bool,
    pub dpu_ne: bool,
    pub rx_key_id: u8,
    pub ub: bool,
    pub rmf: bool,
    pub uma_bypass: bool,
    pub csr11: bool,
    pub scan_learn: bool,
    pub rx_ch: u8,
    pub rtsf: bool,
    pub bsf: bool,
    pub a2hf: bool,
    pub st_auf: bool,
    pub dpu_sign: u8,
    pub dpu_rf: u8,

    pub pdu: Pdu,

    pub addr3: u8,
    pub addr2: u8,
    pub addr1: u8,
    pub dpu_desc_idx: u8,

    pub rxp_flags: u32,
    pub rate_id: u16,

    /// 高 8 位为原始 RSSI 读数
    pub phy_stat0: u32,
    pub phy_stat1: u32,
    pub rx_times: u32,
    pub pmi_cmd: [u32; 6],

    pub reorder_slot_id: u8,
    pub reorder_fwd_id: u8,
    pub reorder_code: u8,

    pub exp_seq_num: u16,
    pub cur_seq_num: u16,
    pub fr_type_subtype: u8,

    pub msdu_size: u16,
    pub sub_fr_id: u8,
    pub proc_order: u8,
    pub aef: bool,
    pub lsf: bool,
    pub esf: bool,
    pub asf: bool,
}

impl RxBd {
    /// 从线上字节（缓冲开头）解码 RX BD
    pub fn decode(wire: &[u8]) -> TxRxResult<Self> {
        let mut w: [u32; RX_BD_WORDS] = load_words(wire).ok_or(TxRxError::Truncated {
            need: RX_BD_SIZE,
            have: wire.len(),
        })?;
        buff_to_be(&mut w);
        Ok(Self::from_host_words(&w))
    }

    fn from_host_words(w: &[u32; RX_BD_WORDS]) -> Self {
        let w0 = LocalRegisterCopy::<u32, RxBd0::Register>::new(w[W_FLAGS]);
        let w5 = LocalRegisterCopy::<u32, RxBd5::Register>::new(w[W_ADDR]);
        let w6 = LocalRegisterCopy::<u32, RxBd6::Register>::new(w[W_RATE]);
        let w16 = LocalRegisterCopy::<u32, RxBd16::Register>::new(w[W_REORDER]);
        let w17 = LocalRegisterCopy::<u32, RxBd17::Register>::new(w[W_SEQ]);
        let w18 = LocalRegisterCopy::<u32, RxBd18::Register>::new(w[W_MSDU]);
        let mut pdu = [0u32; PDU_WORDS];
        pdu.copy_from_slice(&w[W_PDU..W_PDU + PDU_WORDS]);
        let mut pmi_cmd = [0u32; 6];
        pmi_cmd.copy_from_slice(&w[W_PMI_CMD..W_PMI_CMD + 6]);

        Self {
            bdt: w0.read(RxBd0::BDT) as u8,
            ft: w0.is_set(RxBd0::FT),
            dpu_ne: w0.is_set(RxBd0::DPU_NE),
            rx_key_id: w0.read(RxBd0::RX_KEY_ID) as u8,
            ub: w0.is_set(RxBd0::UB),
            rmf: w0.is_set(RxBd0::RMF),
            uma_bypass: w0.is_set(RxBd0::UMA_BYPASS),
            csr11: w0.is_set(RxBd0::CSR11),
            scan_learn: w0.is_set(RxBd0::SCAN_LEARN),
            rx_ch: w0.read(RxBd0::RX_CH) as u8,
            rtsf: w0.is_set(RxBd0::RTSF),
            bsf: w0.is_set(RxBd0::BSF),
            a2hf: w0.is_set(RxBd0::A2HF),
            st_auf: w0.is_set(RxBd0::ST_AUF),
            dpu_sign: w0.read(RxBd0::DPU_SIGN) as u8,
            dpu_rf: w0.read(RxBd0::DPU_RF) as u8,
            pdu: Pdu::from_words(&pdu),
            addr3: w5.read(RxBd5::ADDR3) as u8,
            addr2: w5.read(RxBd5::ADDR2) as u8,
            addr1: w5.read(RxBd5::ADDR1) as u8,
            dpu_desc_idx: w5.read(RxBd5::DPU_DESC_IDX) as u8,
            rxp_flags: w6.read(RxBd6::RXP_FLAGS),
            rate_id: w6.read(RxBd6::RATE_ID) as u16,
            phy_stat0: w[W_PHY_STAT0],
            phy_stat1: w[W_PHY_STAT1],
            rx_times: w[W_RX_TIMES],
            pmi_cmd,
            reorder_slot_id: w16.read(RxBd16::REORDER_SLOT_ID) as u8,
            reorder_fwd_id: w16.read(RxBd16::REORDER_FWD_ID) as u8,
            reorder_code: w16.read(RxBd16::REORDER_CODE) as u8,
            exp_seq_num: w17.read(RxBd17::EXP_SEQ_NUM) as u16,
            cur_seq_num: w17.read(RxBd17::CUR_SEQ_NUM) as u16,
            fr_type_subtype: w17.read(RxBd17::FR_TYPE_SUBTYPE) as u8,
            msdu_size: w18.read(RxBd18::MSDU_SIZE) as u16,
            sub_fr_id: w18.read(RxBd18::SUB_FR_ID) as u8,
            proc_order: w18.read(RxBd18::PROC_ORDER) as u8,
            aef: w18.is_set(RxBd18::AEF),
            lsf: w18.is_set(RxBd18::LSF),
            esf: w18.is_set(RxBd18::ESF),
            asf: w18.is_set(RxBd18::ASF),
        }
    }

    fn to_host_words(&self) -> [u32; RX_BD_WORDS] {
        let mut w = [0u32; RX_BD_WORDS];

        let mut w0 = LocalRegisterCopy::<u32, RxBd0::Register>::new(0);
        w0.write(
            RxBd0::BDT.val(self.bdt as u32)
                + RxBd0::FT.val(self.ft as u32)
                + RxBd0::DPU_NE.val(self.dpu_ne as u32)
                + RxBd0::RX_KEY_ID.val(self.rx_key_id as u32)
                + RxBd0::UB.val(self.ub as u32)
                + RxBd0::RMF.val(self.rmf as u32)
                + RxBd0::UMA_BYPASS.val(self.uma_bypass as u32)
                + RxBd0::CSR11.val(self.csr11 as u32)
                + RxBd0::SCAN_LEARN.val(self.scan_learn as u32)
                + RxBd0::RX_CH.val(self.rx_ch as u32)
                + RxBd0::RTSF.val(self.rtsf as u32)
                + RxBd0::BSF.val(self.bsf as u32)
                + RxBd0::A2HF.val(self.a2hf as u32)
                + RxBd0::ST_AUF.val(self.st_auf as u32)
                + RxBd0::DPU_SIGN.val(self.dpu_sign as u32)
                + RxBd0::DPU_RF.val(self.dpu_rf as u32),
        );
        w[W_FLAGS] = w0.get();
        w[W_PDU..W_PDU + PDU_WORDS].copy_from_slice(&self.pdu.to_words());

        let mut w5 = LocalRegisterCopy::<u32, RxBd5::Register>::new(0);
        w5.write(
            RxBd5::ADDR3.val(self.addr3 as u32)
                + RxBd5::ADDR2.val(self.addr2 as u32)
                + RxBd5::ADDR1.val(self.addr1 as u32)
                + RxBd5::DPU_DESC_IDX.val(self.dpu_desc_idx as u32),
        );
        w[W_ADDR] = w5.get();

        let mut w6 = LocalRegisterCopy::<u32, RxBd6::Register>::new(0);
        w6.write(RxBd6::RXP_FLAGS.val(self.rxp_flags) + RxBd6::RATE_ID.val(self.rate_id as u32));
        w[W_RATE] = w6.get();

        w[W_PHY_STAT0] = self.phy_stat0;
        w[W_PHY_STAT1] = self.phy_stat1;
        w[W_RX_TIMES] = self.rx_times;
        w[W_PMI_CMD..W_PMI_CMD + 6].copy_from_slice(&self.pmi_cmd);

        let mut w16 = LocalRegisterCopy::<u32, RxBd16::Register>::new(0);
        w16.write(
            RxBd16::REORDER_SLOT_ID.val(self.reorder_slot_id as u32)
                + RxBd16::REORDER_FWD_ID.val(self.reorder_fwd_id as u32)
                + RxBd16::REORDER_CODE.val(self.reorder_code as u32),
        );
        w[W_REORDER] = w16.get();

        let mut w17 = LocalRegisterCopy::<u32, RxBd17::Register>::new(0);
        w17.write(
            RxBd17::EXP_SEQ_NUM.val(self.exp_seq_num as u32)
                + RxBd17::CUR_SEQ_NUM.val(self.cur_seq_num as u32)
                + RxBd17::FR_TYPE_SUBTYPE.val(self.fr_type_subtype as u32),
        );
        w[W_SEQ] = w17.get();

        let mut w18 = LocalRegisterCopy::<u32, RxBd18::Register>::new(0);
        w18.write(
            RxBd18::MSDU_SIZE.val(self.msdu_size as u32)
                + RxBd18::SUB_FR_ID.val(self.sub_fr_id as u32)
                + RxBd18::PROC_ORDER.val(self.proc_order as u32)
                + RxBd18::AEF.val(self.aef as u32)
                + RxBd18::LSF.val(self.lsf as u32)
                + RxBd18::ESF.val(self.esf as u32)
                + RxBd18::ASF.val(self.asf as u32),
        );
        w[W_MSDU] = w18.get();
        w
    }

    /// 编码成固件写入的线上字节（回环测试与模拟硬件用）
    pub fn to_wire(&self) -> [u8; RX_BD_SIZE] {
        let mut w = self.to_host_words();
        buff_to_be(&mut w);
        let mut out = [0u8; RX_BD_SIZE];
        store_words(&w, &mut out);
        out
    }

    /// phy_stat0 高字节
    #[inline]
    pub fn rssi_raw(&self) -> u8 {
        (self.phy_stat0 >> 24) as u8
    }

    /// RSSI0 = 100 - 原始读数
    #[inline]
    pub fn rssi0(&self) -> i32 {
        100 - self.rssi_raw() as i32
    }

    /// 信号强度 dBm（-RSSI0）
    #[inline]
    pub fn signal(&self) -> i32 {
        -self.rssi0()
    }
}
