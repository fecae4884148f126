use serde_json::Value;

/// Returns true when every field in `expected` is present in `actual` with an equal value.
///
/// Objects are compared as subsets (extra keys in `actual` are ignored); arrays and scalars
/// must match exactly.
pub fn json_includes(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected.iter().all(|(key, value)| {
            actual
                .get(key)
                .map(|found| json_includes(found, value))
                .unwrap_or(false)
        }),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual
                    .iter()
                    .zip(expected)
                    .all(|(found, wanted)| json_includes(found, wanted))
        }
        _ => actual == expected,
    }
}

/// Asserts that `actual` contains every field of `expected`.
pub fn assert_json_includes(actual: &Value, expected: &Value) {
    assert!(
        json_includes(actual, expected),
        "expected payload to include {}, payload: {}",
        expected,
        actual
    );
}
