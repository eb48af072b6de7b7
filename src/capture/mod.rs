pub mod enrich;
pub mod loader;
pub mod raw;
pub mod tshark;

pub use loader::load_packets;
pub use raw::RawPacket;
pub use tshark::{CaptureSource, TsharkCaptureSource};
