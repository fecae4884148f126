//! Element-by-element decoding for directory listings.
//!
//! Each element is decoded on its own. Failures are recorded and logged, and the remaining
//! elements are still returned.

use oneplatform_core::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LenientList<T> {
    pub items: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> LenientList<T> {
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Decodes every element of `data`, which must be a JSON array.
///
/// A `null` payload is treated as an empty listing.
pub fn decode_lenient<T>(endpoint: &'static str, data: Value) -> ApiResult<LenientList<T>>
where
    T: DeserializeOwned,
{
    let elements = match data {
        Value::Array(elements) => elements,
        Value::Null => Vec::new(),
        _ => {
            return Err(ApiError::UnexpectedShape {
                endpoint,
                expected: "array",
            });
        }
    };

    let mut list = LenientList {
        items: Vec::with_capacity(elements.len()),
        skipped: Vec::new(),
    };
    for (index, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<T>(element) {
            Ok(item) => list.items.push(item),
            Err(err) => {
                warn!(endpoint, index, reason = %err, "skipping malformed record");
                list.skipped.push(Skipped {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(list)
}
