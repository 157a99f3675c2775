/// Trims free text; blank input becomes `None` instead of an empty string.
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    let value = value?.trim();

    if value.is_empty() {
        return None;
    }

    Some(value.to_string())
}
