/// Turns a display name into a URL-safe slug.
///
/// Lowercases the input, collapses every run of non-alphanumeric
/// characters into a single hyphen, and strips leading and trailing
/// hyphens. `"Bright Ideas, Inc."` becomes `"bright-ideas-inc"`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slugifies `input`, falling back to `fallback` when nothing survives.
pub fn slug_or(input: &str, fallback: &str) -> String {
    let slug = slugify(input);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("Bright Ideas, Inc."), "bright-ideas-inc");
    }

    #[test]
    fn trims_edge_hyphens() {
        assert_eq!(slugify("  --Agri/Tech!!  "), "agri-tech");
    }

    #[test]
    fn lowercases() {
        assert_eq!(slugify("GreenCell ENERGY"), "greencell-energy");
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(slug_or("!!!", "story"), "story");
        assert_eq!(slug_or("", "event"), "event");
    }
}
