//! MJPEG-over-UDP wire protocol
//!
//! # Video Datagram Format
//!
//! Each compressed frame is split into fragments of at most
//! [`MAX_PAYLOAD`] bytes. Every fragment is sent as one UDP datagram
//! carrying a fixed 24-byte header followed by the fragment payload:
//!
//! ```text
//! ┌────────┬──────┬─────────────────┬──────────────────────────────────┐
//! │ Offset │ Size │ Field           │ Meaning                          │
//! ├────────┼──────┼─────────────────┼──────────────────────────────────┤
//! │ 0      │ 4    │ magic           │ 0x4D4A5047 ("MJPG")              │
//! │ 4      │ 4    │ sequence        │ per-frame counter, wraps at 2^32 │
//! │ 8      │ 4    │ timestamp-high  │ upper 32 bits of ms timestamp    │
//! │ 12     │ 4    │ timestamp-low   │ lower 32 bits of ms timestamp    │
//! │ 16     │ 4    │ frame-length    │ total compressed frame bytes     │
//! │ 20     │ 2    │ fragment-index  │ 0-based index within the frame   │
//! │ 22     │ 2    │ fragment-count  │ total fragments for the frame    │
//! └────────┴──────┴─────────────────┴──────────────────────────────────┘
//! ```
//!
//! All fields are big-endian. Every fragment of one frame carries the same
//! sequence, timestamp, and frame-length, so a receiver can reassemble the
//! frame from any arrival order and detect loss across frame boundaries.
//!
//! The payload limit of 1300 bytes keeps datagrams below typical path MTU
//! to avoid IP-level fragmentation. Delivery is fire-and-forget: no
//! retransmission, no acknowledgment, single destination.

use crate::error::{Error, Result};

/// Protocol magic constant ("MJPG" in ASCII)
pub const STREAM_MAGIC: u32 = 0x4D4A_5047;

/// Fixed header size in bytes
pub const HEADER_LEN: usize = 24;

/// Maximum fragment payload bytes per datagram
pub const MAX_PAYLOAD: usize = 1300;

/// Video delivery port used when a subscriber does not request one
pub const DEFAULT_VIDEO_PORT: u16 = 5600;

/// Header prepended to every video fragment datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentHeader {
    /// Per-frame counter (identical for all fragments of one frame)
    pub sequence: u32,
    /// Millisecond timestamp (identical for all fragments of one frame)
    pub timestamp_ms: u64,
    /// Total compressed frame length in bytes
    pub frame_len: u32,
    /// 0-based index of this fragment within the frame
    pub fragment_index: u16,
    /// Total number of fragments for this frame
    pub fragment_count: u16,
}

impl FragmentHeader {
    /// Encode to the fixed 24-byte big-endian wire representation
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        let ts_hi = (self.timestamp_ms >> 32) as u32;
        let ts_lo = self.timestamp_ms as u32;
        buf[0..4].copy_from_slice(&STREAM_MAGIC.to_be_bytes());
        buf[4..8].copy_from_slice(&self.sequence.to_be_bytes());
        buf[8..12].copy_from_slice(&ts_hi.to_be_bytes());
        buf[12..16].copy_from_slice(&ts_lo.to_be_bytes());
        buf[16..20].copy_from_slice(&self.frame_len.to_be_bytes());
        buf[20..22].copy_from_slice(&self.fragment_index.to_be_bytes());
        buf[22..24].copy_from_slice(&self.fragment_count.to_be_bytes());
        buf
    }

    /// Decode a header from the start of a received datagram
    pub fn decode(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(Error::InvalidPacket(format!(
                "short header: {} bytes",
                buf.len()
            )));
        }
        let magic = read_u32(buf, 0);
        if magic != STREAM_MAGIC {
            return Err(Error::InvalidPacket(format!("bad magic: {:#010x}", magic)));
        }
        let ts_hi = read_u32(buf, 8) as u64;
        let ts_lo = read_u32(buf, 12) as u64;
        Ok(Self {
            sequence: read_u32(buf, 4),
            timestamp_ms: (ts_hi << 32) | ts_lo,
            frame_len: read_u32(buf, 16),
            fragment_index: read_u16(buf, 20),
            fragment_count: read_u16(buf, 22),
        })
    }
}

/// Number of datagrams needed for a compressed frame of `len` bytes
pub fn fragment_count(len: usize) -> usize {
    len.div_ceil(MAX_PAYLOAD)
}

fn read_u32(buf: &[u8], off: usize) -> u32 {
    u32::from_be_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]])
}

fn read_u16(buf: &[u8], off: usize) -> u16 {
    u16::from_be_bytes([buf[off], buf[off + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = FragmentHeader {
            sequence: 1234,
            timestamp_ms: 0x0001_2345_6789_abcd,
            frame_len: 48_213,
            fragment_index: 7,
            fragment_count: 38,
        };
        let decoded = FragmentHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_header_layout() {
        let header = FragmentHeader {
            sequence: 0x0102_0304,
            timestamp_ms: 0xAABB_CCDD_1122_3344,
            frame_len: 0x0000_1300,
            fragment_index: 0x0506,
            fragment_count: 0x0708,
        };
        let buf = header.encode();
        assert_eq!(&buf[0..4], &[0x4D, 0x4A, 0x50, 0x47]); // "MJPG"
        assert_eq!(&buf[4..8], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&buf[8..12], &[0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(&buf[12..16], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&buf[16..20], &[0x00, 0x00, 0x13, 0x00]);
        assert_eq!(&buf[20..22], &[0x05, 0x06]);
        assert_eq!(&buf[22..24], &[0x07, 0x08]);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let mut buf = FragmentHeader {
            sequence: 0,
            timestamp_ms: 0,
            frame_len: 0,
            fragment_index: 0,
            fragment_count: 1,
        }
        .encode();
        buf[0] = 0xFF;
        assert!(FragmentHeader::decode(&buf).is_err());
    }

    #[test]
    fn test_decode_rejects_short_buffer() {
        assert!(FragmentHeader::decode(&[0u8; 23]).is_err());
        assert!(FragmentHeader::decode(&[]).is_err());
    }

    #[test]
    fn test_fragment_count_boundaries() {
        assert_eq!(fragment_count(0), 0);
        assert_eq!(fragment_count(1), 1);
        assert_eq!(fragment_count(MAX_PAYLOAD), 1);
        assert_eq!(fragment_count(MAX_PAYLOAD + 1), 2);
        assert_eq!(fragment_count(2 * MAX_PAYLOAD), 2);
        assert_eq!(fragment_count(2 * MAX_PAYLOAD + 1), 3);
    }
}
