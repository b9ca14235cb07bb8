use std::path::Path;

use chrono::{DateTime, Local};

use crate::panel::layout::format_timezone_label;

const ZONEINFO_MARKER: &str = "zoneinfo/";
const FALLBACK_ZONE_NAME: &str = "Local";

/// `Region/City` from, in order: `TZ`, `/etc/timezone`, the target of the
/// `/etc/localtime` symlink.
pub fn zone_name_from(
    tz_env: Option<&str>,
    etc_timezone: Option<&str>,
    localtime_link: Option<&Path>,
) -> Option<String> {
    let from_env = tz_env
        .map(|tz| tz.trim().trim_start_matches(':'))
        .filter(|tz| !tz.is_empty())
        .map(|tz| match tz.find(ZONEINFO_MARKER) {
            Some(idx) => &tz[idx + ZONEINFO_MARKER.len()..],
            None => tz,
        });
    let from_file = etc_timezone
        .and_then(|raw| raw.lines().next())
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let from_link = localtime_link
        .and_then(|link| link.to_str())
        .and_then(|link| link.find(ZONEINFO_MARKER).map(|idx| &link[idx + ZONEINFO_MARKER.len()..]))
        .filter(|name| !name.is_empty());

    from_env.or(from_file).or(from_link).map(str::to_string)
}

#[cfg(target_os = "linux")]
fn zone_abbreviation(timestamp: i64) -> Option<String> {
    let time = timestamp as libc::time_t;
    // SAFETY: all-zero is a valid `tm`.
    let mut tm: libc::tm = unsafe { core::mem::zeroed() };
    // SAFETY: both pointers are valid for the duration of the call.
    let result = unsafe { libc::localtime_r(&time, &mut tm) };
    if result.is_null() || tm.tm_zone.is_null() {
        return None;
    }
    // SAFETY: tm_zone points at a NUL-terminated name owned by libc's zone
    // state, which lives for the whole process.
    let name = unsafe { std::ffi::CStr::from_ptr(tm.tm_zone) };
    name.to_str()
        .ok()
        .map(str::to_string)
        .filter(|abbr| !abbr.is_empty())
}

#[cfg(not(target_os = "linux"))]
fn zone_abbreviation(_timestamp: i64) -> Option<String> {
    None
}

/// Bottom-bar label for clock mode.
pub fn local_timezone_label(now: DateTime<Local>) -> String {
    let tz_env = std::env::var("TZ").ok();
    let etc_timezone = std::fs::read_to_string("/etc/timezone").ok();
    let localtime_link = std::fs::read_link("/etc/localtime").ok();
    let name = zone_name_from(
        tz_env.as_deref(),
        etc_timezone.as_deref(),
        localtime_link.as_deref(),
    )
    .unwrap_or_else(|| FALLBACK_ZONE_NAME.to_string());

    let abbreviation = zone_abbreviation(now.timestamp());
    format_timezone_label(
        &name,
        abbreviation.as_deref(),
        now.offset().local_minus_utc(),
    )
}
