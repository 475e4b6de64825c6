//! Port traits defining external boundaries.
//!
//! The application core talks to the hosted list/todo store only through
//! [`RemoteTransport`]. Implementations live in `src/adapters/`.

pub mod remote;

pub use remote::{
    Method, RemoteRequest, RemoteResponse, RemoteTransport, TransportError, TransportFuture,
};
