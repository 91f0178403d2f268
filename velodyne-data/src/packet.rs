use crate::cloud::Header;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One raw sensor packet as received from the wire.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Packet {
    /// Receive time in nanoseconds.
    pub stamp_ns: i64,
    pub data: Vec<u8>,
}

/// Packets grouped by the transport into one message.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacketBatch {
    pub header: Header,
    pub packets: Vec<Packet>,
}
