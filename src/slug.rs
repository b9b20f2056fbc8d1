//! Slug derivation for human-facing identifiers.
//!
//! Slugs are computed once at creation time from the entity's name; the
//! uniqueness policy is an explicit numeric suffix (`-2`, `-3`, ...)
//! rather than anything implicit in the storage layer.

/// Lowercases, strips punctuation, and joins words with hyphens.
/// Names with no alphanumeric content fall back to `untitled` so the
/// unique slug key never goes empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        slug.push_str("untitled");
    }

    slug
}

/// Picks the first free slug given the candidates already taken:
/// the base itself, then `base-2`, `base-3`, and so on.
pub fn dedupe_slug(base: &str, taken: &[String]) -> String {
    if !taken.iter().any(|s| s == base) {
        return base.to_string();
    }

    let mut n = 2u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.iter().any(|s| s == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Spicy Ramen"), "spicy-ramen");
        assert_eq!(slugify("Mario's Pizza!"), "mario-s-pizza");
        assert_eq!(slugify("  Double  Spaces  "), "double-spaces");
    }

    #[test]
    fn test_slugify_trims_trailing_separators() {
        assert_eq!(slugify("Best Burger..."), "best-burger");
    }

    #[test]
    fn test_slugify_never_returns_empty() {
        assert_eq!(slugify("---"), "untitled");
        assert_eq!(slugify("!!!"), "untitled");
        assert_eq!(slugify(""), "untitled");

        let taken = vec!["untitled".to_string()];
        assert_eq!(dedupe_slug(&slugify("***"), &taken), "untitled-2");
    }

    #[test]
    fn test_dedupe_slug_no_collision() {
        assert_eq!(dedupe_slug("spicy-ramen", &[]), "spicy-ramen");
    }

    #[test]
    fn test_dedupe_slug_appends_suffix() {
        let taken = vec!["spicy-ramen".to_string()];
        assert_eq!(dedupe_slug("spicy-ramen", &taken), "spicy-ramen-2");

        let taken = vec!["spicy-ramen".to_string(), "spicy-ramen-2".to_string()];
        assert_eq!(dedupe_slug("spicy-ramen", &taken), "spicy-ramen-3");
    }
}
