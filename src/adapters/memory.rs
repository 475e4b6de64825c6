//! In-process stand-in for the hosted store.
//!
//! Mirrors the store's observable behavior closely enough for tests:
//! string ids assigned on `POST`, shallow field merge on `PUT`, `404` with a
//! `"Not found"` body for unknown ids, and the deleted record echoed back on
//! `DELETE`.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use serde_json::{json, Map, Value};

use crate::model::ResourceKind;
use crate::ports::{
    Method, RemoteRequest, RemoteResponse, RemoteTransport, TransportError, TransportFuture,
};

#[derive(Default)]
struct Collection {
    records: BTreeMap<u64, Map<String, Value>>,
    next_id: u64,
}

#[derive(Default)]
struct State {
    lists: Collection,
    todos: Collection,
    log: Vec<RemoteRequest>,
    injected: Vec<Result<RemoteResponse, TransportError>>,
}

impl State {
    fn collection(&mut self, kind: ResourceKind) -> &mut Collection {
        match kind {
            ResourceKind::Lists => &mut self.lists,
            ResourceKind::Todos => &mut self.todos,
        }
    }
}

/// Thread-safe in-memory store speaking the same routes as the hosted API.
#[derive(Default)]
pub struct InMemoryRemote {
    state: Mutex<State>,
}

impl InMemoryRemote {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next request resolve with `outcome` instead of touching the
    /// store. Several injected outcomes are served in order.
    pub fn inject(&self, outcome: Result<RemoteResponse, TransportError>) {
        self.lock().injected.push(outcome);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.lock().log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, request: &RemoteRequest) -> Result<RemoteResponse, TransportError> {
        let mut state = self.lock();
        state.log.push(request.clone());
        if !state.injected.is_empty() {
            return state.injected.remove(0);
        }

        let Some((kind, id)) = parse_route(&request.path) else {
            return Ok(not_found());
        };
        let collection = state.collection(kind);

        let response = match (request.method, id) {
            (Method::Get, None) => {
                let all: Vec<Value> =
                    collection.records.values().cloned().map(Value::Object).collect();
                ok(200, Value::Array(all))
            }
            (Method::Get, Some(id)) => match collection.records.get(&id) {
                Some(record) => ok(200, Value::Object(record.clone())),
                None => not_found(),
            },
            (Method::Post, None) => {
                let Some(Value::Object(mut record)) = request.body.clone() else {
                    return Ok(bad_request());
                };
                collection.next_id += 1;
                let id = collection.next_id;
                record.insert("id".into(), json!(id.to_string()));
                collection.records.insert(id, record.clone());
                ok(201, Value::Object(record))
            }
            (Method::Put, Some(id)) => {
                let Some(Value::Object(fields)) = request.body.clone() else {
                    return Ok(bad_request());
                };
                match collection.records.get_mut(&id) {
                    Some(record) => {
                        for (key, value) in fields {
                            if key != "id" {
                                record.insert(key, value);
                            }
                        }
                        ok(200, Value::Object(record.clone()))
                    }
                    None => not_found(),
                }
            }
            (Method::Delete, Some(id)) => match collection.records.remove(&id) {
                Some(record) => ok(200, Value::Object(record)),
                None => not_found(),
            },
            _ => not_found(),
        };
        Ok(response)
    }
}

impl RemoteTransport for InMemoryRemote {
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_> {
        let outcome = self.handle(request);
        Box::pin(async move { outcome })
    }
}

fn parse_route(path: &str) -> Option<(ResourceKind, Option<u64>)> {
    let mut segments = path.trim_matches('/').split('/');
    let kind = match segments.next()? {
        "lists" => ResourceKind::Lists,
        "todos" => ResourceKind::Todos,
        _ => return None,
    };
    let id = match segments.next() {
        None => None,
        Some(raw) => Some(raw.parse().ok()?),
    };
    if segments.next().is_some() {
        return None;
    }
    Some((kind, id))
}

fn ok(status: u16, body: Value) -> RemoteResponse {
    RemoteResponse { status, body }
}

fn not_found() -> RemoteResponse {
    RemoteResponse { status: 404, body: json!("Not found") }
}

fn bad_request() -> RemoteResponse {
    RemoteResponse { status: 400, body: json!("Bad request") }
}
