//! wcn36xx 配置文件解析
//!
//! `TAG=value` 一行一项：
//!
//! ```text
//! DEBUG_MASK=0x00001850
//! UNKNOWN_FRAME_POLICY=reject
//! ```
//!
//! 缺省的 tag 保留默认值；值格式不对时告警并返回 `InvalidInput`。

use axerrno::{AxError, AxResult};

use crate::tx::UnknownFramePolicy;

/// 解析后的驱动配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wcn36xxConf {
    /// 调试类别掩码，见 [`crate::debug::dbg_mask`]
    pub debug_mask: u32,
    pub unknown_frame_policy: UnknownFramePolicy,
}

/// 在 file_data 中查找以 tag_name 开头的行，返回其后的值（不含换行）
fn find_tag<'a>(file_data: &'a [u8], tag_name: &str) -> Option<&'a [u8]> {
    let tag = tag_name.as_bytes();
    file_data
        .split(|&b| b == b'\n')
        .find_map(|line| line.strip_prefix(tag))
}

fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// 解析最多 8 位十六进制（可带 0x 前缀）为 u32
fn parse_hex32(s: &[u8]) -> Option<u32> {
    let digits = s
        .strip_prefix(b"0x")
        .or_else(|| s.strip_prefix(b"0X"))
        .unwrap_or(s);
    if digits.is_empty() || digits.len() > 8 {
        return None;
    }
    digits
        .iter()
        .try_fold(0u32, |v, &b| Some((v << 4) | hex_nibble(b)? as u32))
}

fn parse_policy(s: &[u8]) -> Option<UnknownFramePolicy> {
    if s.eq_ignore_ascii_case(b"warn") {
        Some(UnknownFramePolicy::Warn)
    } else if s.eq_ignore_ascii_case(b"reject") {
        Some(UnknownFramePolicy::Reject)
    } else {
        None
    }
}

/// 解析配置文件：DEBUG_MASK=、UNKNOWN_FRAME_POLICY=
pub fn parse_configfile(file_data: &[u8], config: &mut Wcn36xxConf) -> AxResult<()> {
    if let Some(v) = find_tag(file_data, "DEBUG_MASK=") {
        // 去掉行尾 \r
        let v = v.trim_ascii();
        config.debug_mask = parse_hex32(v).ok_or_else(|| {
            log::warn!(target: "wireless::wcn36xx", "cfgfile: bad DEBUG_MASK {:?}", v);
            AxError::InvalidInput
        })?;
    }
    if let Some(v) = find_tag(file_data, "UNKNOWN_FRAME_POLICY=") {
        let v = v.trim_ascii();
        config.unknown_frame_policy = parse_policy(v).ok_or_else(|| {
            log::warn!(target: "wireless::wcn36xx", "cfgfile: bad UNKNOWN_FRAME_POLICY {:?}", v);
            AxError::InvalidInput
        })?;
    }
    log::info!(
        target: "wireless::wcn36xx",
        "cfgfile: debug_mask {:#010x} unknown_frame_policy {:?}",
        config.debug_mask,
        config.unknown_frame_policy
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_tags() {
        let file = b"# wcn36xx\r\nDEBUG_MASK=0x00001850\r\nUNKNOWN_FRAME_POLICY=Reject\r\n";
        let mut conf = Wcn36xxConf::default();
        parse_configfile(file, &mut conf).unwrap();
        assert_eq!(conf.debug_mask, 0x1850);
        assert_eq!(conf.unknown_frame_policy, UnknownFramePolicy::Reject);
    }

    #[test]
    fn missing_tags_keep_defaults() {
        let mut conf = Wcn36xxConf {
            debug_mask: 0x40,
            ..Wcn36xxConf::default()
        };
        parse_configfile(b"MAC_ADDR=00:11:22:33:44:55\n", &mut conf).unwrap();
        assert_eq!(conf.debug_mask, 0x40);
        assert_eq!(conf.unknown_frame_policy, UnknownFramePolicy::Warn);
        parse_configfile(b"", &mut conf).unwrap();
        assert_eq!(conf.debug_mask, 0x40);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let mut conf = Wcn36xxConf::default();
        assert_eq!(
            parse_configfile(b"DEBUG_MASK=zz\n", &mut conf),
            Err(AxError::InvalidInput)
        );
        assert_eq!(
            parse_configfile(b"DEBUG_MASK=0x123456789\n", &mut conf),
            Err(AxError::InvalidInput)
        );
        assert_eq!(
            parse_configfile(b"UNKNOWN_FRAME_POLICY=drop\n", &mut conf),
            Err(AxError::InvalidInput)
        );
        assert_eq!(conf, Wcn36xxConf::default());
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex32(b"ffffffff"), Some(0xffff_ffff));
        assert_eq!(parse_hex32(b"0X10"), Some(0x10));
        assert_eq!(parse_hex32(b"0x"), None);
        assert_eq!(find_tag(b"A=1\nDEBUG_MASK=2", "DEBUG_MASK="), Some(&b"2"[..]));
    }
}
