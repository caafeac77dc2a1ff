//! Time formatting helpers

use chrono::{DateTime, Local, TimeZone};

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`
pub const RFC1123Z: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Format any timestamp as [`RFC1123Z`]
pub fn format_rfc1123z<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    time.format(RFC1123Z).to_string()
}

/// Current local server time as [`RFC1123Z`]
pub fn server_time() -> String {
    format_rfc1123z(&Local::now())
}
