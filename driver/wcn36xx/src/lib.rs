//! Qualcomm WCN36xx 收发描述符路径
//!
//! 对应 Linux drivers/net/wireless/ath/wcn36xx/txrx.c
//!
//! 功能包括:
//! - 描述符编解码 (bd) - 大端字序转换、PDU 子块
//! - RX/TX 描述符布局 (rx_bd / tx_bd)
//! - 接收路径 (rx) - RX BD → 接收状态 + 802.11 帧，交给协议栈
//! - 发送路径 (tx) - 为待发帧生成 TX BD
//! - 调试类别日志 (debug)、配置文件 (cfgfile)

#![no_std]

extern crate alloc;

mod bd;
mod cfgfile;
pub mod debug;
mod error;
mod rx;
mod rx_bd;
mod tx;
mod tx_bd;
mod txrxif;

pub use bd::{buff_to_be, buff_to_be_bytes, Pdu, PDU_WORDS};
pub use cfgfile::{parse_configfile, Wcn36xxConf};
pub use debug::{dbg_mask, debug_mask, set_debug_mask};
pub use error::{TxRxError, TxRxResult};
pub use rx::{rx_skb, rx_status_from_bd, RX_ANTENNA, RX_MACTIME, RX_RATE_IDX};
pub use rx_bd::{RxBd, RX_BD_SIZE, RX_BD_WORDS};
pub use tx::{fill_tx_bd, prepare_tx_bd, tx_skb, TxBdParams, UnknownFramePolicy, VifContext};
pub use tx_bd::{
    TxBd, ACK_POLICY_ACK, ACK_POLICY_NO_ACK, TX_BD_RESERVED3, TX_BD_SIGN, TX_BD_SIGN_WORD,
    TX_BD_SIZE, TX_BD_WORDS, WCN36XX_BD_RATE_CTRL, WCN36XX_BD_RATE_DATA, WCN36XX_BD_RATE_MGMT,
    WCN36XX_BMU_WQ_TX, WCN36XX_TID, WCN36XX_TX_B_WQ_ID, WCN36XX_TX_U_WQ_ID,
};
pub use txrxif::Ieee80211Rx;
