//! Numeric widening of deserialized values
//!
//! A serializer may produce a narrower integer than the type it was looked up
//! for. Lossless widening conversions are applied so the caller can always
//! downcast to the requested type.

use oro_domain::TypeKey;
use oro_domain::ports::SerializedValue;
use std::any::Any;

macro_rules! widen {
    ($value:ident, $target:ident, $($source:ty => [$($wider:ty),+]);+ $(;)?) => {
        $(
            if let Some(source) = $value.downcast_ref::<$source>() {
                $(
                    if $target == TypeKey::of::<$wider>() {
                        return Ok(Box::new(<$wider>::from(*source)));
                    }
                )+
            }
        )+
    };
}

/// Make `value` an instance of `target`
///
/// Returns the untouched value as the error when it is neither of the target
/// type nor losslessly widenable to it.
pub fn coerce(
    value: SerializedValue,
    target: TypeKey,
) -> std::result::Result<SerializedValue, SerializedValue> {
    if (*value).type_id() == target.id() {
        return Ok(value);
    }

    widen!(value, target,
        u8 => [i16, i32, i64, u16, u32, u64];
        i8 => [i16, i32, i64];
        i16 => [i32, i64];
        u16 => [i32, i64, u32, u64];
        i32 => [i64];
        u32 => [i64, u64];
    );

    Err(value)
}
