//! Display implementation for Value

use core::fmt;

use crate::codec::render_text;
use crate::core::value::Value;

/// Plain-text rendering with the record hook enabled
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_text(self, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::I64(-3).to_string(), "-3");
        assert_eq!(Value::from("plain").to_string(), "plain");
        let map: Value = [("k", Value::I32(1))].into_iter().collect();
        assert_eq!(map.to_string(), r#"{"k":1}"#);
    }
}
