//! Domain layer constants
//!
//! Text formats and naming conventions that are part of the observable
//! behaviour of the utilities. Infrastructure-only constants live in
//! `oro_infrastructure::constants`.

// ============================================================================
// SERIALIZATION CONSTANTS
// ============================================================================

/// Output format of serialized date-time values (`yyyy-MM-dd HH:mm:ss`).
///
/// The fractional milliseconds (`.FFF`) are appended separately, trimmed of
/// trailing zeros and omitted together with the dot when zero.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Number of 100-nanosecond ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Largest tick count accepted when deserializing a date-time from ticks
/// (9999-12-31 23:59:59.9999999)
pub const MAX_DATE_TIME_TICKS: i64 = 3_155_378_975_999_999_999;

/// Seconds between 0001-01-01T00:00:00 and the Unix epoch
pub const SECONDS_FROM_YEAR_ONE_TO_UNIX_EPOCH: i64 = 62_135_596_800;

/// Characters trimmed from text before it is handed to a serializer
pub const TRIMMED_SERIALIZED_CHARS: &[char] = &['\u{202c}'];

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Prefix of interface names that have a same-module default implementation
/// (`IWidget` → `Widget`)
pub const INTERFACE_NAME_PREFIX: &str = "I";

// ============================================================================
// CODE GENERATION CONSTANTS
// ============================================================================

/// Prefix of the namespace used for generated classes without an explicit one
pub const DEFAULT_DYNAMIC_NAMESPACE_PREFIX: &str = "DynamicImplementations";
