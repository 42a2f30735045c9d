use crate::{
    backend::Backend,
    error::{Error, Result},
    keyboard::Keyboard,
};

/// A requested group, as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// "2"
    Absolute(i64),
    /// "+1", "-1"
    Relative(i64),
}

impl Target {
    pub fn parse(arg: &str) -> Result<Self> {
        let invalid = || Error::InvalidArgument(arg.to_string());
        let (relative, digits) = match arg.strip_prefix(['+', '-']) {
            Some(digits) => (true, digits),
            None => (false, arg),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: i64 = arg.parse().map_err(|_| invalid())?;
        if relative {
            Ok(Self::Relative(value))
        } else {
            Ok(Self::Absolute(value))
        }
    }

    /// The group index this target selects, from `current` of `count` groups.
    pub fn resolve(self, current: usize, count: usize) -> Result<usize> {
        if count <= 1 {
            return Err(Error::SingleGroup);
        }
        match self {
            Self::Relative(offset) => {
                let count = count as i64;
                let index = (current as i64 + offset % count).rem_euclid(count);
                Ok(index as usize)
            }
            Self::Absolute(value) => match usize::try_from(value) {
                Ok(index) if index < count => Ok(index),
                _ => Err(Error::OutOfRange {
                    value,
                    max: count - 1,
                }),
            },
        }
    }
}

impl<B: Backend> Keyboard<B> {
    /// Switch to the group described by `arg`, e.g. "1", "+1" or "-1".
    pub fn set_group(&mut self, arg: &str) -> Result<()> {
        let target = Target::parse(arg)?;
        let state = self.state();
        let index =
            target.resolve(state.current_index(), state.group_count())?;
        tracing::debug!(?target, index, "Locking group.");
        self.lock_group(index)
    }
}
