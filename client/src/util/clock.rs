//! Wall-clock access for token expiry checks.

/// Milliseconds since the Unix epoch.
///
/// Uses `Date.now()` in the browser, where `std::time::SystemTime` is not
/// available on `wasm32-unknown-unknown`.
pub fn now_millis() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        {
            js_sys::Date::now() as i64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
