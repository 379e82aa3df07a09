//! Small text helpers shared by the assemblers

/// Continuation indent for dimension and measure descriptions
pub const DESCRIPTION_INDENT: usize = 6;

/// Continuation indent for explore descriptions
pub const EXPLORE_DESCRIPTION_INDENT: usize = 4;

/// Indent every line after the first so a multi-line description lines up
/// inside its block
pub fn indent_description(description: &str, spaces: usize) -> String {
    description.replace('\n', &format!("\n{}", " ".repeat(spaces)))
}

/// Treat an empty override the same as a missing one
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}
