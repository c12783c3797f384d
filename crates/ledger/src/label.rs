/// Sizes that carry no information for a customer-facing label.
const HIDDEN_SIZES: &[&str] = &["", "standard", "n/a", "na", "none", "n.a."];

/// Builds the customer-facing label for a line, e.g. `"Pot of Original Cold Brew"`.
///
/// The size is trimmed and lowercased before it is rendered; identity matching in the
/// ledger uses the raw size, so two lines can differ only by size casing and still share
/// a label.
pub fn display_label(item_name: &str, size: &str) -> String {
    let normalized = size.trim().to_lowercase();
    let prefix = match normalized.as_str() {
        s if HIDDEN_SIZES.contains(&s) => String::new(),
        "kannchen" => "Kannchen of ".to_string(),
        "pot" => "Pot of ".to_string(),
        other => format!("{} ", capitalize(other)),
    };
    format!("{prefix}{item_name}").trim().to_string()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
