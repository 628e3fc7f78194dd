//! Display text formatting for the damage counter.
//!
//! The counter element only renders plain digits, so everything here
//! produces ASCII with no separators.

/// Format a running damage total for the counter element.
///
/// Rounds to the nearest integer with ties going to the even neighbour,
/// matching how the game server's runtime rounds, and drops the fraction.
///
/// # Examples
/// ```
/// use damage_display_types::formatting::format_total;
/// assert_eq!(format_total(25.0), "25");
/// assert_eq!(format_total(12.4), "12");
/// assert_eq!(format_total(12.5), "12");
/// assert_eq!(format_total(13.5), "14");
/// ```
pub fn format_total(total: f64) -> String {
    let rounded = total.round_ties_even();
    if rounded == 0.0 {
        // Avoid rendering "-0"
        return "0".to_string();
    }
    format!("{:.0}", rounded)
}

/// Format the time left before an entry expires, one decimal place.
///
/// Returns `"expired"` once the deadline has passed.
///
/// # Examples
/// ```
/// use damage_display_types::formatting::format_remaining;
/// assert_eq!(format_remaining(2.54), "2.5s");
/// assert_eq!(format_remaining(0.0), "expired");
/// ```
pub fn format_remaining(secs: f32) -> String {
    if secs <= 0.0 {
        return "expired".to_string();
    }
    format!("{:.1}s", secs)
}
