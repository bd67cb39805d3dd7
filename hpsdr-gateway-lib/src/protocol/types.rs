/// HPSDR Protocol 1 sync bytes, the first two bytes of every frame.
pub const SYNC: [u8; 2] = [0xEF, 0xFE];

/// Command byte values found at offset 2 of a Protocol 1 frame.
pub const CMD_DATA_IQ: u8 = 0x01;
pub const CMD_DISCOVERY: u8 = 0x02;
pub const CMD_SET_IP: u8 = 0x04;

/// Minimum size, in bytes, of a Protocol 1 I/Q data frame.
pub const DATA_FRAME_SIZE: usize = 1032;

/// Offset of the C0 control byte within the first embedded USB frame
/// of a data packet.
pub const C0_OFFSET: usize = 11;

/// A classified view over a received UDP datagram.
///
/// Carries only the fields meaningful for its variant, replacing a
/// single struct with a grab-bag of `Option` fields for data the
/// variant doesn't have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketRecord {
    /// Discovery request or response. `is_response` is set when the
    /// MAC-address field (bytes 3..9) is non-zero; `mac` and
    /// `board_id` are only populated on that branch.
    Discovery {
        is_response: bool,
        mac: Option<String>,
        board_id: Option<u8>,
    },
    /// SET IP, sent by a client to claim/configure a radio. Checked
    /// before Discovery since both share the 0xEFFE prefix.
    SetIp { target_ip: Option<std::net::Ipv4Addr> },
    /// Protocol 1 I/Q data frame, carrying a sequence number and the
    /// PTT/frequency-change bits out of control byte C0.
    Data {
        sequence: u32,
        ptt: bool,
        freq_change: bool,
    },
    /// Reserved for a wider HPSDR command set than Protocol 1's four
    /// framed commands. No Protocol 1 byte layout produces these from
    /// `classify`; they exist so `PacketRecord` has somewhere to carry
    /// a future producer's Start/Stop frames and so the dispatcher's
    /// match arms stay exhaustive without a wildcard swallowing new
    /// variants silently.
    Start,
    Stop,
    /// Recognized sync bytes but no matching command, or a frame too
    /// short to classify.
    Unknown,
}
