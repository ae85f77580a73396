//! Terminal coercions.

use indexmap::IndexMap;
use nebula_value::{F32Key, F64Key, KeyedMap, Map, ScalarKind, Value};
use serde::de::DeserializeOwned;

use super::{Navigator, guard};
use crate::coerce::{self, Coerce, CoerceCx};
use crate::error::NavResult;

macro_rules! terminals {
    ($($(#[$doc:meta])* $name:ident -> $ty:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self) -> NavResult<$ty> {
                self.convert(stringify!($name), <$ty as Coerce>::KEYED, <$ty as Coerce>::coerce)
            }
        )*
    };
}

impl Navigator {
    /// Coerce the reached value into `T`
    pub fn to<T: Coerce>(&self) -> NavResult<T> {
        let location = format!("to::<{}>", T::target());
        self.convert(&location, T::KEYED, T::coerce)
    }

    /// Map the reached value onto a serde type
    pub fn to_record<T: DeserializeOwned>(&self) -> NavResult<T> {
        self.convert("to_record", true, coerce::to_record::<T>)
    }

    /// Raw bytes, or the bytes of the text rendering
    pub fn to_bytes(&self) -> NavResult<Vec<u8>> {
        self.convert("to_bytes", false, coerce::coerce_bytes)
    }

    /// Elements as text; typed non-text arrays are rejected
    pub fn to_list_str(&self) -> NavResult<Vec<String>> {
        self.convert("to_list_str", false, |value, cx| {
            if let Value::Array(array) = value
                && array.kind() != ScalarKind::Text
            {
                return Err(cx.convert_failed(format!(
                    "{} is not a list of strings, use to_list_str_forced",
                    value.type_name()
                )));
            }
            Vec::<String>::coerce(value, cx)
        })
    }

    terminals! {
        to_str -> String;
        to_i8 -> i8;
        to_i16 -> i16;
        to_i32 -> i32;
        to_i64 -> i64;
        to_u8 -> u8;
        to_u16 -> u16;
        to_u32 -> u32;
        to_u64 -> u64;
        to_f32 -> f32;
        to_f64 -> f64;
        to_bool -> bool;
        /// A one-character text, or a number naming a code point
        to_char -> char;

        /// Text keys, values as they are
        to_map -> Map;
        /// Keys of any scalar kind, values as they are
        to_map_any -> KeyedMap;
        to_map_i32 -> IndexMap<i32, Value>;
        to_map_i64 -> IndexMap<i64, Value>;
        to_map_u32 -> IndexMap<u32, Value>;
        to_map_u64 -> IndexMap<u64, Value>;
        to_map_f32 -> IndexMap<F32Key, Value>;
        to_map_f64 -> IndexMap<F64Key, Value>;
        to_map_str_to_str -> IndexMap<String, String>;
        to_map_i64_to_i64 -> IndexMap<i64, i64>;
        to_map_f32_to_f32 -> IndexMap<F32Key, f32>;
        to_map_f64_to_f64 -> IndexMap<F64Key, f64>;

        to_list -> Vec<Value>;
        to_list_map -> Vec<Map>;
        /// Every element rendered as text, whatever its type
        to_list_str_forced -> Vec<String>;
        to_list_i32 -> Vec<i32>;
        to_list_i64 -> Vec<i64>;
        to_list_u32 -> Vec<u32>;
        to_list_u64 -> Vec<u64>;
        to_list_f32 -> Vec<f32>;
        to_list_f64 -> Vec<f64>;
        to_list_bool -> Vec<bool>;
        to_list_char -> Vec<char>;
    }

    fn convert<T>(
        &self,
        location: &str,
        keyed: bool,
        f: impl FnOnce(&Value, &CoerceCx<'_>) -> NavResult<T>,
    ) -> NavResult<T> {
        self.check()?;
        let policy = self.policy();
        let cx = CoerceCx::new(&policy, location).in_span(&self.span);
        let source = if keyed { self.keyed_source() } else { &*self.current };
        guard(location, || f(source, &cx))
    }
}
