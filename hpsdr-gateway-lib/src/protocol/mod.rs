mod classify;
mod frequency;
mod types;

pub use classify::{classify, ClassifierStats};
pub use frequency::extract_frequency_hz;
pub use types::{PacketRecord, CMD_DATA_IQ, CMD_DISCOVERY, CMD_SET_IP, SYNC};
