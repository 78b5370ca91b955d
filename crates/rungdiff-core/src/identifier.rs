//! Element identifiers backed by string interning.
//!
//! PLCopen documents identify every diagram element by a `localId`
//! attribute that stays stable across revisions of the same file. The diff
//! engine correlates elements by this value, so identifiers are compared and
//! hashed constantly; [`ElementId`] interns the string once and is `Copy`.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Stable identifier of a diagram element.
///
/// # Examples
///
/// ```
/// use rungdiff_core::identifier::ElementId;
///
/// let contact = ElementId::new("3");
/// let same = ElementId::new("3");
/// assert_eq!(contact, same);
/// assert_eq!(contact, "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from a `localId` string.
    ///
    /// # Arguments
    ///
    /// * `local_id` - The document's local identifier of the element
    pub fn new(local_id: &str) -> Self {
        Self(interner().get_or_intern(local_id))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        write!(f, "{str_value}")
    }
}

impl From<&str> for ElementId {
    fn from(local_id: &str) -> Self {
        Self::new(local_id)
    }
}

impl PartialEq<str> for ElementId {
    /// Allows direct comparison with string slices: `id == "12"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        let self_str = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        self_str == other
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
