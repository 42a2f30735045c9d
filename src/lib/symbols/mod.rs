#[cfg(test)]
mod tests;

/// Tokens in the symbols atom which are not keyboard layouts.
const NON_LAYOUT: [&str; 3] = ["group", "inet", "pc"];

/// Layouts and their variants, index-aligned, in source order.
#[derive(Debug, Default, PartialEq)]
pub struct Symbols {
    pub symbols: Vec<String>,
    pub variants: Vec<String>,
}

impl Symbols {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn close(&mut self, symbol: &mut String, variant: &mut String) {
        let symbol = std::mem::take(symbol);
        let variant = std::mem::take(variant);
        if is_layout(&symbol) {
            self.symbols.push(symbol);
            self.variants.push(variant);
        }
    }
}

fn is_layout(symbol: &str) -> bool {
    !symbol.is_empty() && !NON_LAYOUT.contains(&symbol)
}

/// Parse a compound symbols string, such as
/// "pc+fi(dvorak)+fi:2+ru:3+inet(evdev)+group(menu_toggle)".
///
/// A token starts after a '+' or '_' separator and runs over alphabetic
/// characters, with an optional parenthesized variant. Anything else (":2",
/// for instance) ends the token and is skipped up to the next separator.
pub fn parse(data: &str) -> Symbols {
    let mut parsed = Symbols::default();
    let mut in_symbol = false;
    let mut symbol = String::new();
    let mut variant = String::new();
    let mut chars = data.chars();
    while let Some(c) = chars.next() {
        match c {
            '+' | '_' if in_symbol => {
                parsed.close(&mut symbol, &mut variant);
            }
            '+' | '_' => {
                in_symbol = true;
            }
            c if in_symbol && c.is_alphabetic() => {
                symbol.push(c);
            }
            '(' if in_symbol => {
                variant.extend(chars.by_ref().take_while(|c| *c != ')'));
            }
            _ if in_symbol => {
                parsed.close(&mut symbol, &mut variant);
                in_symbol = false;
            }
            _ => {}
        }
    }
    if in_symbol {
        parsed.close(&mut symbol, &mut variant);
    }
    parsed
}
