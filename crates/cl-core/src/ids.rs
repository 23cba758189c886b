use core::fmt;
use core::num::NonZeroU32;

/// Position of an element in the simulation roster.
///
/// - `u32` keeps handles small
/// - `NonZero` lets `Option<ElementId>` stay the same size
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(NonZeroU32);

impl ElementId {
    /// Create an id from a 0-based roster index by storing index+1.
    ///
    /// Returns `None` for `u32::MAX`, whose successor does not fit.
    pub fn from_index(index: usize) -> Option<Self> {
        let raw = u32::try_from(index).ok()?.checked_add(1)?;
        NonZeroU32::new(raw).map(Self)
    }

    /// Recover the 0-based roster index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.index())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}
