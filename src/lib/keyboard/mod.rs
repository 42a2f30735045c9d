
use std::fmt;

use anyhow::anyhow;

use crate::{
    backend::{Backend, GroupNames, MAX_GROUPS},
    error::{Error, Result},
    symbols, text,
};

/// Symbol of the groups the symbols atom has no layout for.
const UNKNOWN_SYMBOL: &str = "en_US";

/// Name of a group which has neither a name nor a symbol.
const UNKNOWN_NAME: &str = "U/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutGroup {
    pub index: usize,
    pub name: String,
    pub symbol: String,
    /// Empty when the layout has no variant.
    pub variant: String,
}

impl LayoutGroup {
    /// The variant, or the symbol when there is no variant.
    pub fn variant_or_symbol(&self) -> &str {
        if self.variant.is_empty() {
            &self.symbol
        } else {
            &self.variant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    groups: Vec<LayoutGroup>,
    current: usize,
}

impl KeyboardState {
    pub fn build<B: Backend>(backend: &B) -> Result<Self> {
        let names = backend.group_names().map_err(Error::StateBuild)?;
        let symbols = backend.symbols().map_err(Error::StateBuild)?;
        if symbols.is_empty() {
            return Err(Error::StateBuild(anyhow!("symbols atom is empty")));
        }
        tracing::debug!(?names, ?symbols, "Keyboard description.");
        let groups = groups(&names, &symbols);
        let current = backend.current_group().map_err(Error::StateBuild)?;
        let current = valid_index(current, groups.len())
            .map_err(Error::StateBuild)?;
        Ok(Self { groups, current })
    }

    /// Re-read the current group. The groups themselves are fixed.
    pub fn refresh<B: Backend>(&mut self, backend: &B) -> Result<()> {
        let current = backend
            .current_group()
            .and_then(|current| valid_index(current, self.groups.len()))
            .map_err(Error::Backend)?;
        tracing::debug!(from = self.current, to = current, "Refreshed.");
        self.current = current;
        Ok(())
    }

    pub fn groups(&self) -> &[LayoutGroup] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &LayoutGroup {
        &self.groups[self.current]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.symbol.as_str())
    }

    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.variant.as_str())
    }
}

impl fmt::Display for KeyboardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.current();
        write!(
            f,
            "xkb {{\n\t{} groups {{{}}},\n\tsymbols {{{}}}\n\t\
            current group: {} - {} ({})\n}}",
            self.group_count(),
            self.names().collect::<Vec<_>>().join(", "),
            self.symbols().collect::<Vec<_>>().join(", "),
            current.symbol,
            current.name,
            self.current,
        )
    }
}

fn valid_index(index: usize, count: usize) -> anyhow::Result<usize> {
    if index < count {
        Ok(index)
    } else {
        Err(anyhow!(
            "current group {} out of range for {} groups",
            index,
            count
        ))
    }
}

/// Groups configured on the server. Prefers the controls record; otherwise
/// counts leading present names. Never less than one.
fn group_count(names: &GroupNames) -> usize {
    let count = names.count.unwrap_or_else(|| {
        names
            .names
            .iter()
            .take(MAX_GROUPS)
            .take_while(|name| name.is_some())
            .count()
    });
    count.clamp(1, MAX_GROUPS)
}

/// "English (US)" -> "English"
fn strip_annotation(name: &str) -> &str {
    match name.find('(') {
        None => name,
        Some(pos) => {
            let end = name[..pos]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            &name[..end]
        }
    }
}

/// Index in `to` of the entry matching `from[index]`, or `index` itself when
/// there is no such entry.
fn group_lookup(index: usize, from: &[String], to: &[String]) -> usize {
    let src = &from[index];
    if src.is_empty() {
        return index;
    }
    to.iter()
        .position(|target| text::eq_no_case(src, target))
        .unwrap_or(index)
}

fn groups(names: &GroupNames, symbols: &str) -> Vec<LayoutGroup> {
    let mut count = group_count(names);
    let mut names: Vec<String> = (0..count)
        .map(|i| match names.names.get(i) {
            Some(Some(name)) => strip_annotation(name).to_string(),
            Some(None) | None => String::new(),
        })
        .collect();
    let symbols::Symbols {
        mut symbols,
        mut variants,
    } = symbols::parse(symbols);

    if symbols.len() == 1 && names[0].is_empty() && symbols[0] == "jp" {
        count = 2;
        symbols.insert(0, "us".to_string());
        variants.insert(0, String::new());
        names = vec!["US/ASCII".to_string(), "Japanese".to_string()];
    } else {
        symbols.truncate(count);
        variants.truncate(count);
        // Right-align what was parsed. Positional, not semantic.
        let missing = count - symbols.len();
        if missing > 0 {
            tracing::debug!(missing, "Fewer layouts than groups.");
            symbols = std::iter::repeat(UNKNOWN_SYMBOL.to_string())
                .take(missing)
                .chain(symbols)
                .collect();
            variants = std::iter::repeat(String::new())
                .take(missing)
                .chain(variants)
                .collect();
        }
    }

    for i in 0..count {
        if names[i].is_empty() {
            let symbol = &symbols[group_lookup(i, &names, &symbols)];
            let name = if symbol.is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                symbol.clone()
            };
            tracing::warn!(group = i, ?name, "Group name is undefined.");
            names[i] = name;
        }
    }

    names
        .into_iter()
        .zip(symbols)
        .zip(variants)
        .enumerate()
        .map(|(index, ((name, symbol), variant))| LayoutGroup {
            index,
            name,
            symbol,
            variant,
        })
        .collect()
}

/// The connected keyboard: the backend and the state built from it.
pub struct Keyboard<B: Backend> {
    backend: B,
    state: KeyboardState,
}

impl<B: Backend> Keyboard<B> {
    pub fn new(backend: B) -> Result<Self> {
        let state = KeyboardState::build(&backend)?;
        tracing::debug!("\n{}", state);
        Ok(Self { backend, state })
    }

    pub fn state(&self) -> &KeyboardState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn lock_group(&mut self, index: usize) -> Result<()> {
        self.backend.lock_group(index).map_err(Error::LockGroup)?;
        self.state.refresh(&self.backend)
    }
}
