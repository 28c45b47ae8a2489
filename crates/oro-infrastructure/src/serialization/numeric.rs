//! Integer and floating point serializers
//!
//! Integers use invariant decimal text with an optional sign. Doubles use the
//! shortest text that parses back to the same value, plus `NaN`, `Infinity`
//! and `-Infinity`.

use oro_domain::ports::ValueSerializer;

macro_rules! integer_serializer {
    ($(#[$meta:meta])* $name:ident, $value:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl ValueSerializer for $name {
            type Value = $value;

            fn serialize(&self, value: &$value) -> Option<String> {
                Some(value.to_string())
            }

            fn deserialize(&self, text: &str) -> Option<$value> {
                text.trim().parse().ok()
            }

            fn to_source_code(&self, value: &$value) -> String {
                format!("{}_{}", value, stringify!($value))
            }
        }
    };
}

integer_serializer!(
    /// 64-bit signed integers
    I64Serializer,
    i64
);
integer_serializer!(
    /// 32-bit signed integers
    I32Serializer,
    i32
);
integer_serializer!(
    /// 16-bit signed integers
    I16Serializer,
    i16
);
integer_serializer!(
    /// Unsigned bytes
    U8Serializer,
    u8
);

const NAN_TEXT: &str = "NaN";
const INFINITY_TEXT: &str = "Infinity";
const NEGATIVE_INFINITY_TEXT: &str = "-Infinity";

/// Double precision floating point numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct F64Serializer;

impl ValueSerializer for F64Serializer {
    type Value = f64;

    fn serialize(&self, value: &f64) -> Option<String> {
        let text = if value.is_nan() {
            NAN_TEXT.to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                INFINITY_TEXT
            } else {
                NEGATIVE_INFINITY_TEXT
            }
            .to_string()
        } else {
            value.to_string()
        };
        Some(text)
    }

    fn deserialize(&self, text: &str) -> Option<f64> {
        // Rust's parser accepts "inf" and "infinity" in any case
        text.trim().parse().ok()
    }

    fn to_source_code(&self, value: &f64) -> String {
        if value.is_nan() {
            "f64::NAN".to_string()
        } else if value.is_infinite() {
            if value.is_sign_positive() {
                "f64::INFINITY"
            } else {
                "f64::NEG_INFINITY"
            }
            .to_string()
        } else {
            format!("{value:?}_f64")
        }
    }
}
