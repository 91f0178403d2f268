#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which echo of the laser pulse produced a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReturnType {
    /// No usable echo was received
    #[default]
    Invalid,
    /// Strongest echo in single return mode
    SingleStrongest,
    /// Last echo in single return mode
    SingleLast,
    /// Strongest echo, reported first in dual return mode
    DualStrongestFirst,
    /// Strongest echo, reported last in dual return mode
    DualStrongestLast,
    /// Weak echo, reported first in dual return mode
    DualWeakFirst,
    /// Weak echo, reported last in dual return mode
    DualWeakLast,
    /// The only echo in dual return mode
    DualOnly,
}

impl ReturnType {
    /// Return type from its numeric code in the sensor data. Unknown codes
    /// map to `Invalid`.
    pub fn from_code(code: u8) -> ReturnType {
        match code {
            1 => ReturnType::SingleStrongest,
            2 => ReturnType::SingleLast,
            3 => ReturnType::DualStrongestFirst,
            4 => ReturnType::DualStrongestLast,
            5 => ReturnType::DualWeakFirst,
            6 => ReturnType::DualWeakLast,
            7 => ReturnType::DualOnly,
            _ => ReturnType::Invalid,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ReturnType::Invalid => 0,
            ReturnType::SingleStrongest => 1,
            ReturnType::SingleLast => 2,
            ReturnType::DualStrongestFirst => 3,
            ReturnType::DualStrongestLast => 4,
            ReturnType::DualWeakFirst => 5,
            ReturnType::DualWeakLast => 6,
            ReturnType::DualOnly => 7,
        }
    }
}
