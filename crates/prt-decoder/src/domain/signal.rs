//! # Signal Formatter
//!
//! Display classification of a recovered 16-byte signal.
//!
//! Classification order: all zeros, IPv4-mapped IPv6, IPv6, raw bytes.
//!
//! IPv6 rendering is not RFC 5952: it collapses the first run of
//! zero groups that starts after the first group, never touching the last
//! group, rather than the longest run.

use std::fmt;
use std::net::Ipv4Addr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::entities::SIGNAL_SIZE;

/// `::ffff:0:0/96`
const IPV4_MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF];

const IPV6_GROUPS: usize = SIGNAL_SIZE / 2;

/// How a signal is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalDisplay {
    /// Every byte is zero; carries base64 of the raw bytes
    AllZero(String),
    /// IPv4-mapped address
    Ipv4(Ipv4Addr),
    /// Eight lowercase hex groups with at most one `::`
    Ipv6(String),
    /// Not 16 bytes; carries base64 of the raw bytes
    Raw(String),
}

impl fmt::Display for SignalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDisplay::AllZero(raw) => write!(f, "Signal is all zeros (raw): {raw}"),
            SignalDisplay::Ipv4(addr) => write!(f, "Signal (IP Address): {addr}"),
            SignalDisplay::Ipv6(addr) => write!(f, "Signal (IP Address): {addr}"),
            SignalDisplay::Raw(raw) => write!(f, "Signal (raw): {raw}"),
        }
    }
}

/// Classify and render a signal.
pub fn format_signal(signal: &[u8]) -> SignalDisplay {
    if signal.iter().all(|&b| b == 0) {
        return SignalDisplay::AllZero(STANDARD.encode(signal));
    }

    if signal.len() != SIGNAL_SIZE {
        return SignalDisplay::Raw(STANDARD.encode(signal));
    }

    if signal[..12] == IPV4_MAPPED_PREFIX {
        return SignalDisplay::Ipv4(Ipv4Addr::new(
            signal[12], signal[13], signal[14], signal[15],
        ));
    }

    SignalDisplay::Ipv6(format_ipv6(signal))
}

fn format_ipv6(signal: &[u8]) -> String {
    let groups: Vec<String> = signal
        .chunks_exact(2)
        .map(|pair| format!("{:x}", u16::from_be_bytes([pair[0], pair[1]])))
        .collect();

    // Run may start at group 1 at the earliest and may not include the last group.
    let start = (1..IPV6_GROUPS - 1).find(|&i| groups[i] == "0");
    let Some(start) = start else {
        return groups.join(":");
    };
    let end = (start..IPV6_GROUPS - 1)
        .take_while(|&i| groups[i] == "0")
        .last()
        .map_or(start, |last| last + 1);

    format!(
        "{}::{}",
        groups[..start].join(":"),
        groups[end..].join(":")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn test_all_zero() {
        let display = format_signal(&[0u8; 16]);
        assert_eq!(
            display,
            SignalDisplay::AllZero("AAAAAAAAAAAAAAAAAAAAAA==".into())
        );
        assert_eq!(
            display.to_string(),
            "Signal is all zeros (raw): AAAAAAAAAAAAAAAAAAAAAA=="
        );
    }

    #[test]
    fn test_ipv4_mapped() {
        let display = format_signal(&signal("00000000000000000000ffff0a000001"));
        assert_eq!(display, SignalDisplay::Ipv4(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(display.to_string(), "Signal (IP Address): 10.0.0.1");
    }

    #[test]
    fn test_ipv6_without_zero_groups() {
        let display = format_signal(&signal("20010db8123456789abcdef011223344"));
        assert_eq!(
            display,
            SignalDisplay::Ipv6("2001:db8:1234:5678:9abc:def0:1122:3344".into())
        );
    }

    #[test]
    fn test_ipv6_collapses_first_run_only() {
        let display = format_signal(&signal("20010db8000000000000ff0000420329"));
        assert_eq!(display, SignalDisplay::Ipv6("2001:db8::ff00:42:329".into()));

        // Second, longer run stays expanded.
        let display = format_signal(&signal("2001000000010000000000000000abcd"));
        assert_eq!(
            display,
            SignalDisplay::Ipv6("2001::1:0:0:0:0:abcd".into())
        );
    }

    #[test]
    fn test_ipv6_leading_and_trailing_zero_groups() {
        // First group is never part of the run.
        let display = format_signal(&signal("00000000000000010000000000000000"));
        assert_eq!(display, SignalDisplay::Ipv6("0::1:0:0:0:0".into()));

        // Last group is never part of the run.
        let display = format_signal(&signal("00010000000000000000000000000000"));
        assert_eq!(display, SignalDisplay::Ipv6("1::0".into()));
    }

    #[test]
    fn test_at_most_one_collapse() {
        let display = format_signal(&signal("abcd0000ef000000123400005678fedc"));
        let rendered = match display {
            SignalDisplay::Ipv6(s) => s,
            other => panic!("expected IPv6, got {other:?}"),
        };
        assert_eq!(rendered.matches("::").count(), 1);
        assert_eq!(rendered, "abcd::ef00:0:1234:0:5678:fedc");
    }

    #[test]
    fn test_non_sixteen_byte_signal_is_raw() {
        let display = format_signal(&[1, 2, 3]);
        assert_eq!(display, SignalDisplay::Raw("AQID".into()));
        assert_eq!(display.to_string(), "Signal (raw): AQID");
    }
}
