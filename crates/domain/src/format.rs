//! Formatter: pure conversions from raw metrics to display strings and colours.
//!
//! Fixed-point output follows the rounding the dashboard has always shown:
//! ties round away from zero (`1.5` → `2`), unlike Rust's `{:.0}` which
//! rounds to even.

/// Default style: no explicit colour.
pub const COLOR_DEFAULT: &str = "";
/// Amber, used for busy servers and 71–90 % bars.
pub const COLOR_AMBER: &str = "#faae42";
/// Red, used for > 90 % bars and every offline surface.
pub const COLOR_RED: &str = "#e62965";
/// Grey status dot of an offline server.
pub const COLOR_GREY: &str = "#a2a5b9";

/// CPU percentage above which a server counts as busy.
pub const BUSY_THRESHOLD: i64 = 70;
/// Percentage above which a progress bar turns red.
pub const CRITICAL_THRESHOLD: i64 = 90;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Round half up, the way the dashboard rounds percentages.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn js_round(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    rounded as i64
}

/// Render `value` with exactly `digits` decimals, ties away from zero.
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(i32::try_from(digits).unwrap_or(i32::MAX));
    let rounded = (value * factor).round() / factor;
    format!("{rounded:.digits$}")
}

/// Format a byte count with a single-letter unit (`B`, `K`, `M`, `G`, `T`).
///
/// Below 1 MiB no decimals are shown, the `M` range gets one and the
/// `G`/`T` ranges get two.
#[must_use]
pub fn byte_convert(bytes: f64) -> String {
    if bytes < KIB {
        format!("{}B", to_fixed(bytes, 0))
    } else if bytes < MIB {
        format!("{}K", to_fixed(bytes / KIB, 0))
    } else if bytes < GIB {
        format!("{}M", to_fixed(bytes / MIB, 1))
    } else if bytes < TIB {
        format!("{}G", to_fixed(bytes / GIB, 2))
    } else {
        format!("{}T", to_fixed(bytes / TIB, 2))
    }
}

/// Format a value already expressed in KiB with binary suffixes.
///
/// Same ladder as [`byte_convert`] shifted by one step; `TiB` is the last
/// tier and never promotes further.
#[must_use]
pub fn byte_convert_kib(kib: f64) -> String {
    if kib < KIB {
        format!("{}KiB", to_fixed(kib, 0))
    } else if kib < MIB {
        format!("{}MiB", to_fixed(kib / KIB, 0))
    } else if kib < GIB {
        format!("{}GiB", to_fixed(kib / MIB, 1))
    } else {
        format!("{}TiB", to_fixed(kib / GIB, 2))
    }
}

/// `"{up}↑ {down}↓"` using [`byte_convert`] on both sides.
#[must_use]
pub fn up_down(up: f64, down: f64) -> String {
    format!("{}↑ {}↓", byte_convert(up), byte_convert(down))
}

/// Progress-bar colour for a rounded percentage. Boundaries belong to the
/// lower tier.
#[must_use]
pub fn progress_color(percent: i64) -> &'static str {
    if percent <= BUSY_THRESHOLD {
        COLOR_DEFAULT
    } else if percent <= CRITICAL_THRESHOLD {
        COLOR_AMBER
    } else {
        COLOR_RED
    }
}

/// Status text for a rounded CPU percentage.
///
/// Only distinguishes idle from busy; the red tier of [`progress_color`]
/// has no label of its own.
#[must_use]
pub fn status_label(cpu: i64) -> &'static str {
    if cpu <= BUSY_THRESHOLD {
        "Available"
    } else {
        "Busy"
    }
}

/// Status dot and card border colour for a rounded CPU percentage.
#[must_use]
pub fn status_color(cpu: i64) -> &'static str {
    if cpu <= BUSY_THRESHOLD {
        COLOR_DEFAULT
    } else {
        COLOR_AMBER
    }
}

/// Normalize the collector's localized uptime.
///
/// A single day is spelled `"1 Day"`; every other value has its first
/// `天` replaced by `"Days"`. `HH:MM:SS` values pass through.
#[must_use]
pub fn normalize_uptime(uptime: &str) -> String {
    if uptime == "1 天" {
        "1 Day".to_string()
    } else {
        uptime.replacen('天', "Days", 1)
    }
}
