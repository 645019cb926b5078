//! Encoding between a user's homes and the durable text blob.
//!
//! The blob is a compact JSON array of home records. The vault treats it
//! as opaque text; only this module knows its shape. Coordinates are
//! carried as JSON numbers, which round-trip exactly for every finite
//! value the record types hold. JSON has no literal for NaN or the
//! infinities, and the serializer would write `null` in their place,
//! producing a blob the next decode rejects. `encode` refuses such
//! records instead, so a flush fails loudly and the previous blob
//! survives.

use hearth_core::{Error, Home, Result};

fn finite(home: &Home) -> bool {
    home.x.is_finite()
        && home.y.is_finite()
        && home.z.is_finite()
        && home.yaw.is_finite()
        && home.pitch.is_finite()
}

/// Serialize homes into a single blob. An empty slice encodes to `[]`.
/// Fails with [`Error::Encode`] if any record carries a non-finite
/// coordinate.
pub fn encode(homes: &[Home]) -> Result<String> {
    if let Some(home) = homes.iter().find(|home| !finite(home)) {
        return Err(Error::encode(format!(
            "'{}' has a non-finite coordinate",
            home.name
        )));
    }
    serde_json::to_string(homes).map_err(|e| Error::encode(e.to_string()))
}

/// Parse a blob back into home records, preserving blob order.
pub fn decode(blob: &str) -> Result<Vec<Home>> {
    serde_json::from_str(blob).map_err(Error::Decode)
}
