/// `numerator / denominator` rounded half away from zero; 0 when the
/// denominator is 0.
pub fn rounded_div(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((2 * numerator + denominator) / (2 * denominator)) as u32
}

/// `part / whole` as an integer percentage, rounded.
pub fn percentage(part: u32, whole: u32) -> u32 {
    rounded_div(100 * u64::from(part), u64::from(whole))
}
