//! # ieee80211：IEEE 802.11 / mac80211 抽象
//!
//! 收发描述符层用到的 Linux 802.11 接口子集。
//!
//! ## 模块与 Linux 对应
//!
//! | 模块      | Linux 位置                | 说明 |
//! |-----------|---------------------------|------|
//! | ieee80211 | include/linux/ieee80211.h | 频段、信道、frame_control 分类、头长度、序列号 |
//! | mac80211  | net/mac80211.h            | ieee80211_rx_status、RX_FLAG_* |

#![no_std]

pub mod ieee80211;
pub mod mac80211;

pub use ieee80211::{Band, Channel};
pub use mac80211::{rx_flag, RxStatus};
