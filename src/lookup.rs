/// Outcome of a single upstream lookup.
///
/// `Absent` means the upstream answered and confirmed there is nothing to
/// find. `Unavailable` means the upstream could not be asked or gave an
/// unusable answer. The classifier treats both the same way, but they are
/// kept apart so logs and callers can tell them apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
    Unavailable,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Lookup::Unavailable)
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Absent,
        }
    }
}
