//! Text and boolean serializers

use oro_domain::ports::ValueSerializer;

/// Strings are stored as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

impl ValueSerializer for StringSerializer {
    type Value = String;

    fn serialize(&self, value: &String) -> Option<String> {
        Some(value.clone())
    }

    fn deserialize(&self, text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn to_source_code(&self, value: &String) -> String {
        format!("String::from({value:?})")
    }
}

/// `true` / `false`, parsed case-insensitively
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSerializer;

impl ValueSerializer for BoolSerializer {
    type Value = bool;

    fn serialize(&self, value: &bool) -> Option<String> {
        Some(value.to_string())
    }

    fn deserialize(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn to_source_code(&self, value: &bool) -> String {
        value.to_string()
    }
}
