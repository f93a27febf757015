//! Tri-state logic value carried on every node output.

/// The value driven by a node.
///
/// `Unknown` is the state of every node before it has been driven by a
/// stimulus or evaluated from fully-known inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Signal {
    #[default]
    Unknown,
    Low,
    High,
}

impl Signal {
    /// `Some(bool)` for a driven signal, `None` while unknown.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Signal::Unknown => None,
            Signal::Low => Some(false),
            Signal::High => Some(true),
        }
    }

    #[inline]
    pub fn is_known(self) -> bool {
        self != Signal::Unknown
    }
}

impl From<bool> for Signal {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Signal::High
        } else {
            Signal::Low
        }
    }
}

impl From<Option<bool>> for Signal {
    #[inline]
    fn from(value: Option<bool>) -> Self {
        value.map_or(Signal::Unknown, Signal::from)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Signal::Unknown => 'X',
            Signal::Low => '0',
            Signal::High => '1',
        };
        write!(f, "{}", c)
    }
}
