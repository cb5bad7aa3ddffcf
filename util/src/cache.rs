//! Cache directives attached to topic responses.
//!
//! Reads are cacheable per user for a short time. A bulk import invalidates
//! whatever the browser holds so the next listing is fetched fresh.

/// `Cache-Control` for per-user cacheable reads.
pub const PRIVATE_CACHE: &str = "private, max-age=60";

/// `Cache-Control` for responses that must never be stored.
pub const NO_STORE: &str = "no-store";

/// Header name used to ask the browser to drop its cache.
pub const CLEAR_SITE_DATA: &str = "clear-site-data";

/// `Clear-Site-Data` value for dropping cached responses only.
pub const CLEAR_CACHE: &str = "\"cache\"";
