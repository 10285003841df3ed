use std::collections::HashSet;

/// Merges a boilerplate prompt with a request prompt.
///
/// Both are split on commas into tags; tags are trimmed, empty ones dropped,
/// and duplicates removed case-insensitively, keeping the first occurrence
/// with its original casing.
pub fn combine(default_text: &str, user_text: &str) -> String {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for tag in default_text.split(',').chain(user_text.split(',')) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }

        if seen.insert(tag.to_lowercase()) {
            tags.push(tag);
        }
    }

    tags.join(", ")
}
