//! 缓冲描述符（BD）公共部分：字节序转换与 PDU 子块
//!
//! 固件按 32 位字、大端存放 BD。主机侧先把整块描述符按字做一次 `buff_to_be`，
//! 再按位域读写；位号一律按线上字的 MSB-first 编号（bit 31 为首位），与主机结构体布局无关。
//!
//! PDU 子块（RX/TX 描述符的第 1..=4 字）：
//!
//! | 字 | 位域 |
//! |----|------|
//! | 0  | dpu_fb[31:24] adu_fb[23:16] pdu_id[15:0] |
//! | 1  | tail_pdu_idx[31:16] head_pdu_idx[15:0] |
//! | 2  | pdu_count[31:25] mpdu_data_off[24:16] mpdu_header_off[15:8] mpdu_header_len[7:0] |
//! | 3  | reserved4[31:24] tid[23:20] reserved3[19:16] mpdu_len[15:0] |

use tock_registers::{register_bitfields, LocalRegisterCopy};

/// 大端线上字与主机字之间的就地转换（方向无关，两次调用还原）。
///
/// 小端主机上逐字交换字节，大端主机上不变。
#[inline]
pub fn buff_to_be(words: &mut [u32]) {
    for w in words.iter_mut() {
        *w = w.to_be();
    }
}

/// [`buff_to_be`] 的字节缓冲版本，`buf` 按 4 字节一字解释。
///
/// 长度须为 4 的倍数；末尾不足一字的字节不处理。
pub fn buff_to_be_bytes(buf: &mut [u8]) {
    debug_assert!(buf.len() % 4 == 0, "bd length {} not word aligned", buf.len());
    for chunk in buf.chunks_exact_mut(4) {
        let w = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        chunk.copy_from_slice(&w.to_be().to_ne_bytes());
    }
}

/// 从 `buf` 开头按主机内存序读出 N 个字；长度不足返回 None。
pub(crate) fn load_words<const N: usize>(buf: &[u8]) -> Option<[u32; N]> {
    let bytes = buf.get(..N * 4)?;
    let mut words = [0u32; N];
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *w = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Some(words)
}

/// 把字按主机内存序写入 `out`（`out` 至少 `words.len() * 4` 字节）。
pub(crate) fn store_words(words: &[u32], out: &mut [u8]) {
    for (w, chunk) in words.iter().zip(out.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&w.to_ne_bytes());
    }
}

register_bitfields![u32,
    pub Pdu0 [
        DPU_FB OFFSET(24) NUMBITS(8) [],
        ADU_FB OFFSET(16) NUMBITS(8) [],
        PDU_ID OFFSET(0) NUMBITS(16) []
    ],
    pub Pdu1 [
        TAIL_PDU_IDX OFFSET(16) NUMBITS(16) [],
        HEAD_PDU_IDX OFFSET(0) NUMBITS(16) []
    ],
    pub Pdu2 [
        PDU_COUNT OFFSET(25) NUMBITS(7) [],
        MPDU_DATA_OFF OFFSET(16) NUMBITS(9) [],
        MPDU_HEADER_OFF OFFSET(8) NUMBITS(8) [],
        MPDU_HEADER_LEN OFFSET(0) NUMBITS(8) []
    ],
    pub Pdu3 [
        RESERVED4 OFFSET(24) NUMBITS(8) [],
        TID OFFSET(20) NUMBITS(4) [],
        /// 固件要求的保留值，TX 时固定写 0xd
        RESERVED3 OFFSET(16) NUMBITS(4) [],
        MPDU_LEN OFFSET(0) NUMBITS(16) []
    ]
];

/// PDU 子块占用的字数
pub const PDU_WORDS: usize = 4;

/// mpdu_header_len / mpdu_header_off 可表示的最大值（8 位）
pub const MPDU_HEADER_MAX: usize = 0xFF;
/// mpdu_data_off 可表示的最大值（9 位）
pub const MPDU_DATA_OFF_MAX: usize = 0x1FF;
/// mpdu_len 可表示的最大值（16 位）
pub const MPDU_LEN_MAX: usize = 0xFFFF;

/// PDU 子块（主机序字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pdu {
    pub dpu_fb: u8,
    pub adu_fb: u8,
    pub pdu_id: u16,
    pub tail_pdu_idx: u16,
    pub head_pdu_idx: u16,
    pub pdu_count: u8,
    /// 描述符起点到帧体的偏移
    pub mpdu_data_off: u16,
    /// 描述符起点到 MAC 头的偏移
    pub mpdu_header_off: u8,
    pub mpdu_header_len: u8,
    pub reserved4: u8,
    pub tid: u8,
    pub reserved3: u8,
    pub mpdu_len: u16,
}

impl Pdu {
    /// 从主机序的 4 个字解析
    pub(crate) fn from_words(w: &[u32; PDU_WORDS]) -> Self {
        let w0 = LocalRegisterCopy::<u32, Pdu0::Register>::new(w[0]);
        let w1 = LocalRegisterCopy::<u32, Pdu1::Register>::new(w[1]);
        let w2 = LocalRegisterCopy::<u32, Pdu2::Register>::new(w[2]);
        let w3 = LocalRegisterCopy::<u32, Pdu3::Register>::new(w[3]);
        Self {
            dpu_fb: w0.read(Pdu0::DPU_FB) as u8,
            adu_fb: w0.read(Pdu0::ADU_FB) as u8,
            pdu_id: w0.read(Pdu0::PDU_ID) as u16,
            tail_pdu_idx: w1.read(Pdu1::TAIL_PDU_IDX) as u16,
            head_pdu_idx: w1.read(Pdu1::HEAD_PDU_IDX) as u16,
            pdu_count: w2.read(Pdu2::PDU_COUNT) as u8,
            mpdu_data_off: w2.read(Pdu2::MPDU_DATA_OFF) as u16,
            mpdu_header_off: w2.read(Pdu2::MPDU_HEADER_OFF) as u8,
            mpdu_header_len: w2.read(Pdu2::MPDU_HEADER_LEN) as u8,
            reserved4: w3.read(Pdu3::RESERVED4) as u8,
            tid: w3.read(Pdu3::TID) as u8,
            reserved3: w3.read(Pdu3::RESERVED3) as u8,
            mpdu_len: w3.read(Pdu3::MPDU_LEN) as u16,
        }
    }

    /// 打包成主机序的 4 个字；超出位宽的高位被截掉
    pub(crate) fn to_words(&self) -> [u32; PDU_WORDS] {
        let mut w0 = LocalRegisterCopy::<u32, Pdu0::Register>::new(0);
        w0.write(
            Pdu0::DPU_FB.val(self.dpu_fb as u32)
                + Pdu0::ADU_FB.val(self.adu_fb as u32)
                + Pdu0::PDU_ID.val(self.pdu_id as u32),
        );
        let mut w1 = LocalRegisterCopy::<u32, Pdu1::Register>::new(0);
        w1.write(
            Pdu1::TAIL_PDU_IDX.val(self.tail_pdu_idx as u32)
                + Pdu1::HEAD_PDU_IDX.val(self.head_pdu_idx as u32),
        );
        let mut w2 = LocalRegisterCopy::<u32, Pdu2::Register>::new(0);
        w2.write(
            Pdu2::PDU_COUNT.val(self.pdu_count as u32)
                + Pdu2::MPDU_DATA_OFF.val(self.mpdu_data_off as u32)
                + Pdu2::MPDU_HEADER_OFF.val(self.mpdu_header_off as u32)
                + Pdu2::MPDU_HEADER_LEN.val(self.mpdu_header_len as u32),
        );
        let mut w3 = LocalRegisterCopy::<u32, Pdu3::Register>::new(0);
        w3.write(
            Pdu3::RESERVED4.val(self.reserved4 as u32)
                + Pdu3::TID.val(self.tid as u32)
                + Pdu3::RESERVED3.val(self.reserved3 as u32)
                + Pdu3::MPDU_LEN.val(self.mpdu_len as u32),
        );
        [w0.get(), w1.get(), w2.get(), w3.get()]
    }
}
