//! SkBuff：对应 Linux `struct sk_buff` 的包缓冲
//!
//! 布局：`[ headroom | data (len) | tailroom ]`，`put`/`pull`/`push`/`trim` 与 `skb_put`、`skb_pull`、
//! `skb_push`、`skb_trim` 语义一致，但越界时返回 `None`/`false` 而不是破坏缓冲。

use alloc::vec::Vec;
use core::ops::Deref;

use ieee80211::RxStatus;

/// 单包缓冲，与 Linux `struct sk_buff` 语义对齐。
///
/// - `data`：当前有效载荷起始（head 之后）
/// - `len`：有效载荷长度
/// - headroom：data 前的预留字节；tailroom：data 末之后的剩余空间
/// - `rx_status`：接收状态侧通道（对应 `IEEE80211_SKB_RXCB(skb)`），整体覆盖写
#[derive(Clone)]
pub struct SkBuff {
    /// 整块存储： [0..head] = headroom, [head..head+len] = data, [head+len..] = tailroom
    storage: Vec<u8>,
    /// data 区在 storage 中的起始下标
    head: usize,
    /// 当前有效 data 长度
    len: usize,
    rx_status: RxStatus,
}

impl SkBuff {
    /// 分配指定总容量的缓冲；初始 data 长度 0。对应 `dev_alloc_skb(size)`。
    pub fn alloc(capacity: usize) -> Self {
        Self::alloc_with_headroom(capacity, 0)
    }

    /// 分配容量并在前端预留 headroom 字节。
    pub fn alloc_with_headroom(capacity: usize, headroom: usize) -> Self {
        let head = headroom.min(capacity);
        let mut storage = Vec::with_capacity(capacity);
        storage.resize(capacity, 0);
        SkBuff {
            storage,
            head,
            len: 0,
            rx_status: RxStatus::default(),
        }
    }

    /// 以 `payload` 为 data 构造，前端预留 headroom（TX 路径常用）。
    pub fn from_payload(payload: &[u8], headroom: usize) -> Self {
        let mut skb = Self::alloc_with_headroom(headroom + payload.len(), headroom);
        if let Some(dst) = skb.put(payload.len()) {
            dst.copy_from_slice(payload);
        }
        skb
    }

    /// 当前有效载荷（data 区）只读视图。
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.storage[self.head..self.head + self.len]
    }

    /// data 起始到存储末尾的可写区域（DMA 写入后配合 `put`/`set_len`）。
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.head..]
    }

    /// data 起始到存储末尾的只读区域，包含尚未 `put` 的 tailroom。
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.storage[self.head..]
    }

    /// 设置当前有效 data 长度。
    #[inline]
    pub fn set_len(&mut self, len: usize) {
        let max = self.storage.len().saturating_sub(self.head);
        self.len = len.min(max);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// headroom 字节数（data 前的空间）。
    #[inline]
    pub fn headroom(&self) -> usize {
        self.head
    }

    /// tailroom 字节数（data 后的空间）。
    #[inline]
    pub fn tailroom(&self) -> usize {
        self.storage.len().saturating_sub(self.head + self.len)
    }

    /// 在尾部追加 n 字节，返回可写切片；空间不足则返回 None。对应 `skb_put(skb, n)`。
    #[inline]
    pub fn put(&mut self, n: usize) -> Option<&mut [u8]> {
        if self.tailroom() < n {
            return None;
        }
        let start = self.head + self.len;
        self.len += n;
        Some(&mut self.storage[start..start + n])
    }

    /// 从 data 头部消费 n 字节，返回剩余 data；n 超过 len 时不做修改并返回 None。对应 `skb_pull(skb, n)`。
    #[inline]
    pub fn pull(&mut self, n: usize) -> Option<&[u8]> {
        if n > self.len {
            return None;
        }
        self.head += n;
        self.len -= n;
        Some(self.data())
    }

    /// 在 data 前占用 n 字节 headroom，返回新 data 起始的可写切片（长度 n）。对应 `skb_push(skb, n)`。
    #[inline]
    pub fn push(&mut self, n: usize) -> Option<&mut [u8]> {
        if self.head < n {
            return None;
        }
        self.head -= n;
        self.len += n;
        Some(&mut self.storage[self.head..self.head + n])
    }

    /// 把 data 截到 len 字节；len 不小于当前长度时无操作。对应 `skb_trim(skb, len)`。
    #[inline]
    pub fn trim(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
        }
    }

    /// 接收状态侧通道
    #[inline]
    pub fn rx_status(&self) -> &RxStatus {
        &self.rx_status
    }

    /// 覆盖写接收状态（不与旧内容合并）
    #[inline]
    pub fn set_rx_status(&mut self, status: RxStatus) {
        self.rx_status = status;
    }
}

impl Deref for SkBuff {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        self.data()
    }
}

impl core::fmt::Debug for SkBuff {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkBuff")
            .field("headroom", &self.headroom())
            .field("len", &self.len)
            .field("tailroom", &self.tailroom())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ieee80211::{rx_flag, Band};

    #[test]
    fn skb_put_pull() {
        let mut skb = SkBuff::alloc_with_headroom(64, 4);
        assert_eq!(skb.headroom(), 4);
        assert_eq!(skb.len(), 0);
        let p = skb.put(8).unwrap();
        p.copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(skb.len(), 8);
        assert_eq!(skb.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(skb.pull(2), Some(&[3, 4, 5, 6, 7, 8][..]));
        assert_eq!(skb.len(), 6);
        assert_eq!(skb.headroom(), 6);
    }

    #[test]
    fn out_of_range_ops_leave_buffer_intact() {
        let mut skb = SkBuff::alloc_with_headroom(16, 2);
        assert!(skb.put(15).is_none());
        assert!(skb.put(14).is_some());
        assert!(skb.pull(15).is_none());
        assert_eq!(skb.len(), 14);
        assert!(skb.push(3).is_none());
        assert_eq!(skb.push(2).map(|h| h.len()), Some(2));
        assert_eq!(skb.len(), 16);
        assert_eq!(skb.headroom(), 0);
    }

    #[test]
    fn dma_area_then_put_and_trim() {
        let mut skb = SkBuff::alloc(8);
        skb.data_mut().copy_from_slice(&[9, 8, 7, 6, 5, 4, 3, 2]);
        assert!(skb.is_empty());
        assert_eq!(skb.raw().len(), 8);
        skb.put(6);
        assert_eq!(&skb[..], &[9, 8, 7, 6, 5, 4]);
        skb.trim(3);
        assert_eq!(&skb[..], &[9, 8, 7]);
        skb.trim(10);
        assert_eq!(skb.len(), 3);
    }

    #[test]
    fn from_payload_reserves_headroom() {
        let skb = SkBuff::from_payload(&[0xaa, 0xbb], 40);
        assert_eq!(skb.headroom(), 40);
        assert_eq!(skb.data(), &[0xaa, 0xbb]);
        assert_eq!(skb.tailroom(), 0);
    }

    #[test]
    fn rx_status_is_overwritten() {
        let mut skb = SkBuff::alloc(4);
        skb.set_rx_status(RxStatus {
            signal: -40,
            antenna: 2,
            ..RxStatus::default()
        });
        skb.set_rx_status(RxStatus {
            band: Band::FiveGhz,
            flag: rx_flag::DECRYPTED,
            ..RxStatus::default()
        });
        let st = skb.rx_status();
        assert_eq!(st.signal, 0);
        assert_eq!(st.antenna, 0);
        assert_eq!(st.band, Band::FiveGhz);
    }
}
