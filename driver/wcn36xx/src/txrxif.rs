//! 与 802.11 协议栈之间的接收接口
//!
//! 驱动把去掉描述符、填好接收状态的帧交给协议栈，之后不再访问该缓冲（对应 `ieee80211_rx_ni`）。

use skb::SkBuff;

/// 协议栈接收入口
pub trait Ieee80211Rx {
    /// 接管 skb；投递结果由协议栈自行处理
    fn rx_ni(&mut self, skb: SkBuff);
}

impl<F: FnMut(SkBuff)> Ieee80211Rx for F {
    fn rx_ni(&mut self, skb: SkBuff) {
        self(skb)
    }
}
