//! Adapters implementing the [`RemoteTransport`](crate::ports::RemoteTransport) port.
//!
//! - `live`: real HTTP against the hosted store.
//! - `recording`: wraps another transport and captures traffic to a cassette.
//! - `replaying`: serves captured traffic back.
//! - `memory`: an in-process stand-in for the store, used by tests.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;

pub use live::LiveRemote;
pub use memory::InMemoryRemote;
pub use recording::RecordingRemote;
pub use replaying::ReplayingRemote;
