//! Header label derivation

/// Columns whose header text is fixed rather than derived
const SPECIAL_LABELS: &[(&str, &str)] = &[("productid", "ID"), ("stockquantity", "Stock"), ("reorderlevel", "Reorder At")];

/// Header label for a column
///
/// `key` is the normalized (lower-case) column, `original` the key as it
/// appeared in the data. Derived labels split camel case and capitalize:
/// `unitPrice` becomes `Unit Price`.
pub fn header_label(key: &str, original: &str) -> String {
    if let Some((_, label)) = SPECIAL_LABELS.iter().find(|(k, _)| *k == key) {
        return label.to_string();
    }

    let mut label = String::with_capacity(original.len() + 4);
    let mut prev: Option<char> = None;
    for c in original.chars() {
        if let Some(p) = prev
            && p.is_ascii_lowercase()
            && c.is_ascii_uppercase()
        {
            label.push(' ');
        }
        label.push(c);
        prev = Some(c);
    }

    capitalize_first(&label)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => first.to_ascii_uppercase().to_string() + chars.as_str(),
        _ => s.to_string(),
    }
}
