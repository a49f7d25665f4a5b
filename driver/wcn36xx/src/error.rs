//! 收发描述符路径错误
//!
//! 硬件给出的几何信息（偏移、长度）与调用方输入在进入热路径前统一校验，
//! 不合法时返回对应的 [`TxRxError`]，而不是越界访问缓冲。

use axerrno::AxError;
use core::fmt;

/// 收发路径错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxRxError {
    /// 缓冲放不下完整描述符
    Truncated { need: usize, have: usize },
    /// RX 描述符给出的 MAC 头偏移落在描述符内部
    HeaderOffset { off: usize },
    /// header_off + mpdu_len 超出缓冲容量
    FrameOverflow { end: usize, capacity: usize },
    /// 值放不进描述符字段，或与帧长度矛盾
    FieldOverflow { field: &'static str, value: usize },
    /// 802.11 头不足以读出 frame_control
    ShortHeader { len: usize },
    /// 未知帧类型且策略为拒绝
    UnknownFrameType { fc: u16 },
    /// headroom 放不下 TX 描述符
    NoHeadroom { need: usize, have: usize },
    /// 尚未设置当前信道
    NoChannel,
    /// 没有活动的虚拟接口
    NoVif,
}

pub type TxRxResult<T> = Result<T, TxRxError>;

impl fmt::Display for TxRxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { need, have } => {
                write!(f, "buffer too short for descriptor: need {} have {}", need, have)
            }
            Self::HeaderOffset { off } => {
                write!(f, "mpdu_header_off {} points inside the descriptor", off)
            }
            Self::FrameOverflow { end, capacity } => {
                write!(f, "frame ends at {} beyond buffer capacity {}", end, capacity)
            }
            Self::FieldOverflow { field, value } => {
                write!(f, "value {} does not fit {}", value, field)
            }
            Self::ShortHeader { len } => write!(f, "802.11 header too short: {} bytes", len),
            Self::UnknownFrameType { fc } => write!(f, "frame control type unknown: {:04x}", fc),
            Self::NoHeadroom { need, have } => {
                write!(f, "no headroom for tx descriptor: need {} have {}", need, have)
            }
            Self::NoChannel => write!(f, "no current channel"),
            Self::NoVif => write!(f, "no active vif"),
        }
    }
}

impl From<TxRxError> for AxError {
    fn from(e: TxRxError) -> Self {
        match e {
            TxRxError::Truncated { .. }
            | TxRxError::HeaderOffset { .. }
            | TxRxError::FrameOverflow { .. } => AxError::InvalidData,
            TxRxError::FieldOverflow { .. }
            | TxRxError::ShortHeader { .. }
            | TxRxError::UnknownFrameType { .. } => AxError::InvalidInput,
            TxRxError::NoHeadroom { .. } => AxError::NoMemory,
            TxRxError::NoChannel | TxRxError::NoVif => AxError::BadState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_axerrno() {
        assert_eq!(
            AxError::from(TxRxError::HeaderOffset { off: 8 }),
            AxError::InvalidData
        );
        assert_eq!(
            AxError::from(TxRxError::UnknownFrameType { fc: 0x000c }),
            AxError::InvalidInput
        );
        assert_eq!(AxError::from(TxRxError::NoVif), AxError::BadState);
        assert_eq!(
            AxError::from(TxRxError::NoHeadroom { need: 40, have: 0 }),
            AxError::NoMemory
        );
    }
}
