use super::{parse, Symbols};

fn symbols(symbols: &[&str], variants: &[&str]) -> Symbols {
    Symbols {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        variants: variants.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn layouts_with_qualifiers() {
    assert_eq!(
        symbols(&["fi", "fi", "ru"], &["dvorak", "", ""]),
        parse("pc+fi(dvorak)+fi:2+ru:3+inet(evdev)+group(menu_toggle)")
    );
}

#[test]
fn reserved_only() {
    let parsed = parse("pc+inet(evdev)+group(menu_toggle)");
    assert!(parsed.is_empty());
    assert!(parsed.variants.is_empty());
}

#[test]
fn empty() {
    assert_eq!(Symbols::default(), parse(""));
}

#[test]
fn leading_token_needs_separator() {
    // First token is never preceded by a separator, so it is skipped.
    assert_eq!(Symbols::default(), parse("us"));
    assert_eq!(symbols(&["us"], &[""]), parse("pc+us"));
}

#[test]
fn trailing_variant_without_close_paren() {
    assert_eq!(symbols(&["us"], &["intl"]), parse("pc+us(intl"));
}

#[test]
fn underscore_separates() {
    assert_eq!(
        symbols(&["us", "de"], &["", "nodeadkeys"]),
        parse("pc_us_de(nodeadkeys)")
    );
}

#[test]
fn doubled_separator_yields_no_empty_symbol() {
    assert_eq!(symbols(&["us", "ru"], &["", ""]), parse("pc++us+ru:2"));
}

#[test]
fn typical_evdev() {
    assert_eq!(
        symbols(&["us", "ru", "ua"], &["", "phonetic", ""]),
        parse("pc+us+ru(phonetic):2+ua:3+inet(evdev)+group(alt_shift_toggle)")
    );
}

#[test]
fn repeated_calls_are_independent() {
    let a = parse("pc+us+de:2");
    let b = parse("pc+us+de:2");
    assert_eq!(a, b);
    assert_eq!(2, a.len());
}
