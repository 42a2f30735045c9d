use unicode_normalization::UnicodeNormalization;

fn normalize_no_case(s: &str) -> String {
    s.to_lowercase().nfkd().collect()
}

/// Case and composition insensitive equality, so that "CAFE\u{301}" matches
/// "café".
pub fn eq_no_case(a: &str, b: &str) -> bool {
    normalize_no_case(a) == normalize_no_case(b)
}

#[cfg(test)]
mod tests {
    #[test]
    fn t_eq_no_case() {
        assert!(super::eq_no_case("Español", "ESPAÑOL"));
        assert!(super::eq_no_case("café", "CAFE\u{0301}"));
        assert!(super::eq_no_case("", ""));
        assert!(!super::eq_no_case("us", "gb"));
        assert!(!super::eq_no_case("us", ""));
    }
}
