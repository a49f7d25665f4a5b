//! Socket buffer (skb) 模块：对应 Linux `linux/skbuff.h`
//!
//! 提供与 Linux `struct sk_buff` 语义对齐的包缓冲，收发描述符路径在其上做 put/pull/push。
//!
//! - **[SkBuff]**：单包缓冲，`data`/`len`/`headroom`/`tailroom`、`put`/`pull`/`push`/`trim`，
//!   以及接收状态侧通道 `rx_status`

#![no_std]

extern crate alloc;

mod skbuff;

pub use skbuff::SkBuff;
