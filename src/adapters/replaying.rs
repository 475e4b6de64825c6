//! Replaying adapter for the `RemoteTransport` port.

use std::sync::{Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::{Cassette, Interaction};
use crate::ports::{RemoteRequest, RemoteTransport, TransportError, TransportFuture};

/// Serves recorded store traffic from a cassette.
///
/// Asking for a route the cassette has no (more) answers for is a
/// transport error naming the routes that are still available.
pub struct ReplayingRemote {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRemote {
    /// Create a replaying transport backed by the given cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        Self { replayer: Mutex::new(CassetteReplayer::new(cassette)) }
    }
}

impl RemoteTransport for ReplayingRemote {
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_> {
        let route = request.route();
        let outcome = {
            let mut replayer = self.replayer.lock().unwrap_or_else(PoisonError::into_inner);
            let next = replayer.next_interaction(&route).map(Interaction::outcome);
            match next {
                Some(outcome) => outcome,
                None => Err(TransportError::Other(format!(
                    "Cassette exhausted: nothing recorded for {route}. Remaining routes: [{}]",
                    replayer.remaining_routes().join(", ")
                ))),
            }
        };
        Box::pin(async move { outcome })
    }
}
