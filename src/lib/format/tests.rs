use crate::{backend::Fixture, error::Error, keyboard::KeyboardState};

use super::{render, Directive};

fn state(current: usize) -> KeyboardState {
    let fixture = Fixture::new(
        "pc+us+fr(azerty):2+inet(evdev)",
        &[Some("English"), Some("French")],
    )
    .with_current(current);
    KeyboardState::build(&fixture).unwrap()
}

#[test]
fn symbol_and_variant_or_symbol() {
    assert_eq!("fr(azerty)", render(&state(1), "%s(%e)").unwrap());
    assert_eq!("us(us)", render(&state(0), "%s(%e)").unwrap());
}

#[test]
fn current_fields() {
    assert_eq!(
        "1 French fr azerty 2",
        render(&state(1), "%c %n %s %v %C").unwrap()
    );
    assert_eq!("[]", render(&state(0), "[%v]").unwrap());
}

#[test]
fn lists_one_line_per_group() {
    let state = state(0);
    assert_eq!("English\nFrench\n", render(&state, "%N").unwrap());
    assert_eq!("us\nfr\n", render(&state, "%S").unwrap());
    assert_eq!("\nazerty\n", render(&state, "%V").unwrap());
    assert_eq!("us\nazerty\n", render(&state, "%E").unwrap());
    assert_eq!("layouts:\nus\nfr\nend", render(&state, "layouts:\n%Send").unwrap());
}

#[test]
fn literal_percent() {
    assert_eq!("100%", render(&state(0), "100%%").unwrap());
    assert_eq!("%s", render(&state(0), "%%s").unwrap());
    assert_eq!("trailing %", render(&state(0), "trailing %").unwrap());
}

#[test]
fn passthrough() {
    assert_eq!("", render(&state(0), "").unwrap());
    assert_eq!("Раскладка: us", render(&state(0), "Раскладка: %s").unwrap());
}

#[test]
fn unknown_directive_aborts() {
    assert!(matches!(
        render(&state(1), "%s then %z"),
        Err(Error::UnknownDirective('z'))
    ));
    assert!(matches!(
        render(&state(1), "% "),
        Err(Error::UnknownDirective(' '))
    ));
}

#[test]
fn t_directive_from_char() {
    for c in "cnsveCNSVE%".chars() {
        assert!(Directive::from_char(c).is_some(), "{:?}", c);
    }
    for c in "zZxX1 ".chars() {
        assert!(Directive::from_char(c).is_none(), "{:?}", c);
    }
}
