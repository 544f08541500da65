/// Formats remaining milliseconds as `MM:SS`, rounding partial seconds up so
/// the readout only shows `00:00` once time is truly out. Negative input
/// clamps to zero; minutes are not wrapped into hours.
pub fn format_time(ms: i64) -> String {
    let total = if ms <= 0 { 0 } else { ms / 1000 + i64::from(ms % 1000 != 0) };
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Whole-percent progress for compact labels
pub fn progress_percentage(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Text progress bar, e.g. `[#####-----]`
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
