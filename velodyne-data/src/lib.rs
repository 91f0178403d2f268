pub mod cloud;
pub mod config;
pub mod packet;
pub mod point;
pub mod return_type;

pub use cloud::{Header, PointCloud};
pub use config::{ConfigUpdate, Configuration, RangeView};
pub use packet::{Packet, PacketBatch};
pub use point::{PointRecord, PointXYZIR};
pub use return_type::ReturnType;
