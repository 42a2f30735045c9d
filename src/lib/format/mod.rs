#[cfg(test)]
mod tests;

use crate::{
    error::{Error, Result},
    keyboard::KeyboardState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    CurrentIndex,
    CurrentName,
    CurrentSymbol,
    CurrentVariant,
    CurrentVariantOrSymbol,
    Count,
    Names,
    Symbols,
    Variants,
    VariantsOrSymbols,
    Percent,
}

impl Directive {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'c' => Some(Self::CurrentIndex),
            'n' => Some(Self::CurrentName),
            's' => Some(Self::CurrentSymbol),
            'v' => Some(Self::CurrentVariant),
            'e' => Some(Self::CurrentVariantOrSymbol),
            'C' => Some(Self::Count),
            'N' => Some(Self::Names),
            'S' => Some(Self::Symbols),
            'V' => Some(Self::Variants),
            'E' => Some(Self::VariantsOrSymbols),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    fn expand(self, state: &KeyboardState, out: &mut String) {
        let current = state.current();
        match self {
            Self::CurrentIndex => {
                out.push_str(&state.current_index().to_string())
            }
            Self::CurrentName => out.push_str(&current.name),
            Self::CurrentSymbol => out.push_str(&current.symbol),
            Self::CurrentVariant => out.push_str(&current.variant),
            Self::CurrentVariantOrSymbol => {
                out.push_str(current.variant_or_symbol())
            }
            Self::Count => out.push_str(&state.group_count().to_string()),
            Self::Names => lines(out, state.names()),
            Self::Symbols => lines(out, state.symbols()),
            Self::Variants => lines(out, state.variants()),
            Self::VariantsOrSymbols => lines(
                out,
                state.groups().iter().map(|g| g.variant_or_symbol()),
            ),
            Self::Percent => out.push('%'),
        }
    }
}

fn lines<'a>(out: &mut String, items: impl Iterator<Item = &'a str>) {
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
}

/// Expand the '%' directives of `template` against `state`.
///
/// Nothing is returned unless the whole template is valid, so a caller never
/// sees a partial rendering.
pub fn render(state: &KeyboardState, template: &str) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek().copied()) {
            ('%', Some(next)) => {
                chars.next();
                Directive::from_char(next)
                    .ok_or(Error::UnknownDirective(next))?
                    .expand(state, &mut out);
            }
            // Trailing '%' is kept as is.
            (c, _) => out.push(c),
        }
    }
    Ok(out)
}
