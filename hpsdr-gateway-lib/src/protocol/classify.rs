use super::types::{PacketRecord, C0_OFFSET, CMD_DATA_IQ, CMD_DISCOVERY, CMD_SET_IP, SYNC};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Classifies a raw UDP payload into a [`PacketRecord`].
///
/// Check order is fixed: SET_IP before Discovery, since both begin
/// with the same sync bytes and SET_IP additionally matches the
/// discovery command's byte layout in degenerate inputs. Data frames
/// are checked last because they require the most bytes to confirm.
pub fn classify(data: &[u8]) -> PacketRecord {
    if is_set_ip(data) {
        return parse_set_ip(data);
    }
    if is_discovery(data) {
        return parse_discovery(data);
    }
    if is_data(data) {
        return parse_data(data);
    }
    PacketRecord::Unknown
}

fn is_set_ip(data: &[u8]) -> bool {
    data.len() >= 3 && data[0..2] == SYNC && data[2] == CMD_SET_IP
}

fn is_discovery(data: &[u8]) -> bool {
    data.len() >= 3 && data[0..2] == SYNC && data[2] == CMD_DISCOVERY
}

fn is_data(data: &[u8]) -> bool {
    data.len() >= 8 && data[0..2] == SYNC && data[2] == CMD_DATA_IQ
}

fn parse_set_ip(data: &[u8]) -> PacketRecord {
    let target_ip = if data.len() >= 8 {
        Some(Ipv4Addr::new(data[4], data[5], data[6], data[7]))
    } else {
        None
    };
    PacketRecord::SetIp { target_ip }
}

fn parse_discovery(data: &[u8]) -> PacketRecord {
    let is_response = data.len() >= 9 && data[3..9].iter().any(|&b| b != 0);
    if !is_response {
        return PacketRecord::Discovery { is_response: false, mac: None, board_id: None };
    }
    let mac = Some(format_mac(&data[3..9]));
    let board_id = data.get(9).copied();
    PacketRecord::Discovery { is_response: true, mac, board_id }
}

/// Renders a 6-byte MAC as lowercase colon-separated hex, e.g.
/// `00:1c:c0:de:ad:01`.
fn format_mac(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(":")
}

fn parse_data(data: &[u8]) -> PacketRecord {
    let sequence = u32::from_be_bytes([data[3], data[4], data[5], data[6]]);
    let (ptt, freq_change) = if data.len() >= C0_OFFSET + 5 {
        let c0 = data[C0_OFFSET];
        (c0 & 0x01 != 0, c0 & 0x02 != 0)
    } else {
        (false, false)
    };
    PacketRecord::Data { sequence, ptt, freq_change }
}

/// Cumulative classifier counters: total datagrams classified, one
/// count per packet kind, and a count of frames that fell through to
/// `Unknown`. Monotonic aside from an explicit [`ClassifierStats::reset`].
#[derive(Debug, Default)]
pub struct ClassifierStats {
    total: AtomicU64,
    discovery: AtomicU64,
    set_ip: AtomicU64,
    data: AtomicU64,
    unknown: AtomicU64,
}

impl ClassifierStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `data` and folds the outcome into these counters.
    pub fn observe(&self, data: &[u8]) -> PacketRecord {
        let record = classify(data);
        self.total.fetch_add(1, Ordering::Relaxed);
        let counter = match record {
            PacketRecord::Discovery { .. } => &self.discovery,
            PacketRecord::SetIp { .. } => &self.set_ip,
            PacketRecord::Data { .. } => &self.data,
            PacketRecord::Start | PacketRecord::Stop | PacketRecord::Unknown => &self.unknown,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        record
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn discovery(&self) -> u64 {
        self.discovery.load(Ordering::Relaxed)
    }

    pub fn set_ip(&self) -> u64 {
        self.set_ip.load(Ordering::Relaxed)
    }

    pub fn data(&self) -> u64 {
        self.data.load(Ordering::Relaxed)
    }

    pub fn unknown(&self) -> u64 {
        self.unknown.load(Ordering::Relaxed)
    }

    /// Zeroes every counter. An explicit operation, never called
    /// implicitly by `observe`.
    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
        self.discovery.store(0, Ordering::Relaxed);
        self.set_ip.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
        self.unknown.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cmd: u8, len: usize) -> Vec<u8> {
        let mut v = vec![0u8; len];
        v[0] = 0xEF;
        v[1] = 0xFE;
        if len > 2 {
            v[2] = cmd;
        }
        v
    }

    #[test]
    fn classifies_discovery_request() {
        let data = frame(CMD_DISCOVERY, 63);
        match classify(&data) {
            PacketRecord::Discovery { is_response, mac, board_id } => {
                assert!(!is_response);
                assert_eq!(mac, None);
                assert_eq!(board_id, None);
            }
            other => panic!("expected Discovery, got {other:?}"),
        }
    }

    #[test]
    fn classifies_discovery_response_by_nonzero_mac() {
        let mut data = frame(CMD_DISCOVERY, 60);
        data[3..9].copy_from_slice(&[0x00, 0x1c, 0xc0, 0xde, 0xad, 0x01]);
        data[9] = 6;
        match classify(&data) {
            PacketRecord::Discovery { is_response, mac, board_id } => {
                assert!(is_response);
                assert_eq!(mac.as_deref(), Some("00:1c:c0:de:ad:01"));
                assert_eq!(board_id, Some(6));
            }
            other => panic!("expected Discovery, got {other:?}"),
        }
    }

    #[test]
    fn classifies_set_ip_before_discovery() {
        let mut data = frame(CMD_SET_IP, 64);
        data[4..8].copy_from_slice(&[192, 168, 1, 50]);
        match classify(&data) {
            PacketRecord::SetIp { target_ip } => {
                assert_eq!(target_ip, Some(Ipv4Addr::new(192, 168, 1, 50)));
            }
            other => panic!("expected SetIp, got {other:?}"),
        }
    }

    #[test]
    fn classifies_data_frame_with_ptt_bit() {
        let mut data = frame(CMD_DATA_IQ, 1032);
        data[3..7].copy_from_slice(&42u32.to_be_bytes());
        data[C0_OFFSET] = 0x01;
        match classify(&data) {
            PacketRecord::Data { sequence, ptt, freq_change } => {
                assert_eq!(sequence, 42);
                assert!(ptt);
                assert!(!freq_change);
            }
            other => panic!("expected Data, got {other:?}"),
        }
    }

    #[test]
    fn classifies_short_garbage_as_unknown() {
        assert!(matches!(classify(&[0xEF]), PacketRecord::Unknown));
        assert!(matches!(classify(&[0x00, 0x00, 0x00]), PacketRecord::Unknown));
    }

    #[test]
    fn classifies_unrecognized_command_as_unknown() {
        let data = frame(0x03, 32);
        assert!(matches!(classify(&data), PacketRecord::Unknown));
    }

    #[test]
    fn data_frame_too_short_for_control_bytes_has_no_flags() {
        let mut data = frame(CMD_DATA_IQ, 10);
        data[3..7].copy_from_slice(&7u32.to_be_bytes());
        match classify(&data) {
            PacketRecord::Data { sequence, ptt, freq_change } => {
                assert_eq!(sequence, 7);
                assert!(!ptt);
                assert!(!freq_change);
            }
            other => panic!("expected Data, got {other:?}"),
        }
    }

    #[test]
    fn stats_count_by_kind_and_reset() {
        let stats = ClassifierStats::new();
        stats.observe(&frame(CMD_DISCOVERY, 63));
        stats.observe(&frame(CMD_SET_IP, 64));
        stats.observe(&frame(CMD_DATA_IQ, 1032));
        stats.observe(&[0x00, 0x00, 0x00]);

        assert_eq!(stats.total(), 4);
        assert_eq!(stats.discovery(), 1);
        assert_eq!(stats.set_ip(), 1);
        assert_eq!(stats.data(), 1);
        assert_eq!(stats.unknown(), 1);

        stats.reset();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.unknown(), 0);
    }
}
