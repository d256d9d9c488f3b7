//! Numeric shoe-size codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric shoe-size code (e.g., EU 7-12 in the sample catalog).
///
/// Together with a product ID this forms the composite key of a cart line:
/// the same product in two sizes occupies two distinct lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(u8);

impl Size {
    /// Create a new size code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the underlying numeric code.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Size {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_display() {
        assert_eq!(Size::new(9).to_string(), "9");
    }

    #[test]
    fn test_size_ordering() {
        assert!(Size::new(7) < Size::new(12));
    }
}
