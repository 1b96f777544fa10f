//! Composite wellness scoring on the shared 1-10 scale.

/// Reverse-code anxiety into calmness on the same 1-10 scale.
///
/// `anxiety_to_calmness(x) + x == 11` for all x, so 1 maps to 10 and 10
/// maps to 1.
pub fn anxiety_to_calmness(anxiety: f64) -> f64 {
    11.0 - anxiety
}

/// Single wellness index: the average of mood and calmness, so higher
/// always means better.
pub fn composite_score(mood: f64, anxiety: f64) -> f64 {
    0.5 * mood + 0.5 * anxiety_to_calmness(anxiety)
}
