//! Pre-processing applied to both sides before scoring.

/// Lower-case, replace anything that is not a letter or digit with a space,
/// and collapse runs of whitespace.
///
/// "Seven (a.k.a. Se7en) (1995)" -> "seven a k a se7en 1995"
pub fn normalize(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
