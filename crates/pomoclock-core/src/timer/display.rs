/// Format a second count as zero-padded `MM:SS`.
///
/// The minutes field may exceed 59 for long countdowns (3600 -> "60:00").
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
