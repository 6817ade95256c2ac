//! Session snapshot save and hydrate.
//!
//! The full {areas, mapView, viewMode} triple is rewritten under one fixed
//! key on every change. Hydration adopts each field independently, so one
//! corrupt field cannot take the others down, and nothing here is ever
//! fatal to the session.

use serde::de::DeserializeOwned;

use aoimap_core::models::SessionSnapshot;
use aoimap_core::ports::KeyValueStore;
use aoimap_core::{AoimapError, Result};

/// Fixed store key for the session snapshot.
pub const STATE_KEY: &str = "aoimap-state";

/// Serialize the snapshot and overwrite the stored copy.
pub fn save(store: &dyn KeyValueStore, snapshot: &SessionSnapshot) -> Result<()> {
    let payload = serde_json::to_string(snapshot)
        .map_err(|e| AoimapError::Serialization(e.to_string()))?;
    store.set(STATE_KEY, &payload)
}

/// Parse a stored payload, tolerating missing or malformed fields.
///
/// The payload must be a JSON object; within it, each of the three fields is
/// adopted independently and falls back to its default when absent or
/// unreadable.
pub fn parse_snapshot(payload: &str) -> Result<SessionSnapshot> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| AoimapError::SnapshotParse { reason: e.to_string() })?;

    Ok(SessionSnapshot {
        areas: field(&value, "areas"),
        map_view: field(&value, "mapView"),
        view_mode: field(&value, "viewMode"),
    })
}

/// Read the stored snapshot. Absence, store errors, and corruption all fall
/// back to defaults with a warning.
pub fn load(store: &dyn KeyValueStore) -> SessionSnapshot {
    let payload = match store.get(STATE_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => return SessionSnapshot::default(),
        Err(e) => {
            tracing::warn!(error = %e, "session store unreadable, starting fresh");
            return SessionSnapshot::default();
        }
    };

    match parse_snapshot(&payload) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "session snapshot corrupt, starting fresh");
            SessionSnapshot::default()
        }
    }
}

fn field<T: DeserializeOwned + Default>(value: &serde_json::Value, key: &str) -> T {
    match value.get(key) {
        None | Some(serde_json::Value::Null) => T::default(),
        Some(raw) => match serde_json::from_value(raw.clone()) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(key, error = %e, "snapshot field unreadable, using default");
                T::default()
            }
        },
    }
}
