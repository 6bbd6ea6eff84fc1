//! Profile events module.
//!
//! Provides the outbound event types, the publisher trait used by services
//! after successful mutations, and the subscription trait the registration
//! consumer reads from. Transport adapters (Kafka) implement both traits.

mod profile_event;
mod publisher;
mod subscription;

pub use profile_event::*;
pub use publisher::*;
pub use subscription::*;
