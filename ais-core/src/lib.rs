//! ais-core: NMEA sentence routing and AIS message decoding.
//!
//! Two stages: the [`router`] turns raw `!AIVDM`/`!AIVDO` lines into complete
//! [`Message`] payloads (reassembling multi-sentence messages), and
//! [`decode`] turns payloads into typed records. Decoders are pure; only the
//! router worker touches async channels.

pub mod bits;
pub mod checksum;
pub mod config;
pub mod decode;
pub mod display;
pub mod mmsi;
pub mod navigation;
pub mod router;
pub mod sentence;
pub mod types;

// Re-export commonly used types at crate root
pub use decode::decode;
pub use router::{run_router, Routed, SentenceRouter};
pub use types::*;
