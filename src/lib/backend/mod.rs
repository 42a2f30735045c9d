mod x11;

pub use self::x11::X11;

use anyhow::{anyhow, Result};

/// XKB never configures more than this many groups (`XkbNumKbdGroups`).
pub const MAX_GROUPS: usize = 4;

/// Group names as the server reports them, atoms already resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupNames {
    /// One slot per possible group. `None` is an absent atom.
    pub names: Vec<Option<String>>,

    /// Authoritative count from the controls record, when there is one.
    pub count: Option<usize>,
}

/// What the keyboard model needs from the display server.
pub trait Backend {
    fn group_names(&self) -> Result<GroupNames>;

    /// The compound symbols atom, e.g. "pc+us+ru:2+inet(evdev)".
    fn symbols(&self) -> Result<String>;

    fn current_group(&self) -> Result<usize>;

    fn lock_group(&mut self, index: usize) -> Result<()>;
}

/// In-memory backend. Replays a fixed server state and applies lock requests
/// to it, so the whole model can run without a display.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub names: GroupNames,
    pub symbols: Option<String>,
    pub current: usize,
    pub reject_locks: bool,
    pub locks: Vec<usize>,
}

impl Fixture {
    pub fn new(symbols: &str, names: &[Option<&str>]) -> Self {
        Self {
            names: GroupNames {
                names: names.iter().map(|n| n.map(String::from)).collect(),
                count: None,
            },
            symbols: Some(symbols.to_string()),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.names.count = Some(count);
        self
    }

    pub fn with_current(mut self, current: usize) -> Self {
        self.current = current;
        self
    }
}

impl Backend for Fixture {
    fn group_names(&self) -> Result<GroupNames> {
        Ok(self.names.clone())
    }

    fn symbols(&self) -> Result<String> {
        self.symbols
            .clone()
            .ok_or_else(|| anyhow!("symbols atom is None"))
    }

    fn current_group(&self) -> Result<usize> {
        Ok(self.current)
    }

    fn lock_group(&mut self, index: usize) -> Result<()> {
        if self.reject_locks {
            return Err(anyhow!("XkbLockGroup rejected group {}", index));
        }
        self.locks.push(index);
        self.current = index;
        Ok(())
    }
}
