//! Display names for selectors and the questions they pick

const MAX_TAG_LIST_CHARS: usize = 100;
const NO_TAGS: &str = "---none---";

/// Name of a selector: `Random with Tags(a,b)` over its include tags
pub fn selector_name<S: AsRef<str>>(include_tag_names: &[S]) -> String {
    let joined = include_tag_names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    let tags = if joined.is_empty() {
        NO_TAGS.to_string()
    } else {
        shorten(&joined, MAX_TAG_LIST_CHARS)
    };
    format!("Random with Tags({})", tags)
}

/// Name shown for a question picked by a selector
pub fn selected_name(question_name: &str, selector_name: &str) -> String {
    format!("{} selected by {}", question_name, selector_name)
}

fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_name_lists_tags() {
        assert_eq!(
            selector_name(&["algebra", "easy"]),
            "Random with Tags(algebra,easy)"
        );
    }

    #[test]
    fn test_selector_name_without_tags() {
        let none: [&str; 0] = [];
        assert_eq!(selector_name(&none), "Random with Tags(---none---)");
    }

    #[test]
    fn test_long_tag_list_is_shortened() {
        let names: Vec<String> = (0..40).map(|i| format!("tag{}", i)).collect();
        let name = selector_name(&names);
        let inner = name
            .trim_start_matches("Random with Tags(")
            .trim_end_matches(')');
        assert_eq!(inner.chars().count(), MAX_TAG_LIST_CHARS);
        assert!(inner.ends_with("..."));
    }

    #[test]
    fn test_selected_name() {
        assert_eq!(
            selected_name("Quadratics", "Random with Tags(algebra)"),
            "Quadratics selected by Random with Tags(algebra)"
        );
    }
}
