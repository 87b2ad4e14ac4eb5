use model::core::value::Value;

/// Renders values as SQL literals for inline VALUES tuples.
pub trait ValueEncoder {
    /// Encodes a non-null value.
    fn encode_value(&self, value: &Value) -> String;

    fn encode_null(&self) -> String {
        "NULL".to_string()
    }

    /// Encodes any value, routing nulls to [`encode_null`](Self::encode_null).
    fn encode(&self, value: &Value) -> String {
        if value.is_null() {
            self.encode_null()
        } else {
            self.encode_value(value)
        }
    }
}
