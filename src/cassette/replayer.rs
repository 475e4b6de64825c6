//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Serves interactions from a loaded cassette, in recorded order per route.
///
/// Requests to different routes may interleave differently on replay than
/// they did while recording; each route keeps its own cursor.
pub struct CassetteReplayer {
    queues: HashMap<String, Vec<Interaction>>,
    cursors: HashMap<String, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues.entry(interaction.route.clone()).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction recorded for `route`, or `None` once the
    /// cassette has nothing (more) for it.
    pub fn next_interaction(&mut self, route: &str) -> Option<&Interaction> {
        let queue = self.queues.get(route)?;
        let cursor = self.cursors.entry(route.to_string()).or_insert(0);
        let interaction = queue.get(*cursor)?;
        *cursor += 1;
        Some(interaction)
    }

    /// Routes that still have unconsumed interactions.
    #[must_use]
    pub fn remaining_routes(&self) -> Vec<String> {
        let mut routes: Vec<String> = self
            .queues
            .iter()
            .filter(|(route, queue)| self.cursors.get(*route).copied().unwrap_or(0) < queue.len())
            .map(|(route, _)| route.clone())
            .collect();
        routes.sort();
        routes
    }
}
