use std::borrow::Cow;

/// Source identifier - mostly static constants
pub type SourceId = Cow<'static, str>;

/// Asset identifier ("BTC", "ETH", "EUR", ...)
pub type AssetId = String;

/// Unix timestamp in seconds, UTC
pub type Timestamp = i64;
