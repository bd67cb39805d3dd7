use std::net::{IpAddr, SocketAddr};

use crate::protocol::PacketRecord;
use crate::radio::RadioDescriptor;

/// Picks which of a radio's two ports a client->radio datagram should
/// land on: Data and Unknown frames go to the data port (Unknown is
/// the data path's catch-all for frames that fail structured
/// classification — dropping the port split for them would sever
/// streaming), Discovery and SetIp go to the control port. For radios
/// with a single shared port the two addresses are identical, so this
/// is a no-op split.
pub fn radio_target(radio: &RadioDescriptor, record: &PacketRecord) -> SocketAddr {
    match record {
        PacketRecord::Data { .. } | PacketRecord::Unknown => radio.data_addr,
        PacketRecord::Discovery { .. } | PacketRecord::SetIp { .. } => radio.control_addr,
        PacketRecord::Start | PacketRecord::Stop => radio.control_addr,
    }
}

/// Recognizes a Discovery response by raw bytes, without going
/// through [`crate::protocol::classify`]. Frames arriving from a
/// known radio endpoint must never reach the classifier (see the
/// engine's dispatch rule), but the opt-in rewrite still needs to
/// tell a Discovery response apart from any other radio-sourced
/// frame, so it repeats the same byte-level check classify() uses.
pub fn is_discovery_response(data: &[u8]) -> bool {
    data.len() >= 9
        && data[0] == crate::protocol::SYNC[0]
        && data[1] == crate::protocol::SYNC[1]
        && data[2] == crate::protocol::CMD_DISCOVERY
        && data[3..9].iter().any(|&b| b != 0)
}

/// Offset of the IPv4 address field inside a Discovery response that
/// some Hermes-Lite variants echo back to the client unchanged; when
/// `rewrite_discovery_response` is enabled the gateway overwrites it
/// with its own listen address so the client dials back through the
/// gateway rather than the radio directly.
const DISCOVERY_RESPONSE_IP_OFFSET: usize = 10;

/// Rewrites bytes[10..14] of a Discovery response in place with
/// `listen_address`. No-op if `data` is too short or `listen_address`
/// is not IPv4.
pub fn rewrite_discovery_response(data: &mut [u8], listen_address: IpAddr) {
    let IpAddr::V4(addr) = listen_address else { return };
    if data.len() < DISCOVERY_RESPONSE_IP_OFFSET + 4 {
        return;
    }
    data[DISCOVERY_RESPONSE_IP_OFFSET..DISCOVERY_RESPONSE_IP_OFFSET + 4]
        .copy_from_slice(&addr.octets());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radio() -> RadioDescriptor {
        RadioDescriptor {
            name: "r1".into(),
            hostname: "10.0.0.1".into(),
            control_addr: "10.0.0.1:1024".parse().unwrap(),
            data_addr: "10.0.0.1:1025".parse().unwrap(),
            resolved: true,
        }
    }

    #[test]
    fn data_frames_route_to_data_port() {
        let record = PacketRecord::Data { sequence: 1, ptt: false, freq_change: false };
        assert_eq!(radio_target(&radio(), &record), radio().data_addr);
    }

    #[test]
    fn non_data_frames_route_to_control_port() {
        let record = PacketRecord::Discovery { is_response: false, mac: None, board_id: None };
        assert_eq!(radio_target(&radio(), &record), radio().control_addr);
    }

    #[test]
    fn unknown_frames_route_to_data_port_like_data() {
        let record = PacketRecord::Unknown;
        assert_eq!(radio_target(&radio(), &record), radio().data_addr);
    }

    #[test]
    fn recognizes_discovery_response_by_raw_bytes() {
        let mut data = vec![0u8; 60];
        data[0] = 0xEF;
        data[1] = 0xFE;
        data[2] = 0x02;
        data[3] = 0x00;
        data[4] = 0x1c;
        assert!(is_discovery_response(&data));
    }

    #[test]
    fn discovery_request_is_not_a_response() {
        let mut data = vec![0u8; 60];
        data[0] = 0xEF;
        data[1] = 0xFE;
        data[2] = 0x02;
        assert!(!is_discovery_response(&data));
    }

    #[test]
    fn rewrites_ip_bytes_in_place() {
        let mut data = vec![0u8; 20];
        rewrite_discovery_response(&mut data, IpAddr::from([192, 168, 1, 10]));
        assert_eq!(&data[10..14], &[192, 168, 1, 10]);
    }

    #[test]
    fn skips_rewrite_when_too_short() {
        let mut data = vec![0u8; 8];
        let original = data.clone();
        rewrite_discovery_response(&mut data, IpAddr::from([192, 168, 1, 10]));
        assert_eq!(data, original);
    }
}
