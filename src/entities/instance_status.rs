use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a physical game copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InstanceStatus {
    /// Copy is in stock and sellable
    #[default]
    Available,
    /// Copy has been sold
    SoldOut,
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InstanceStatus {
    /// Convert from the stored string representation. Matching is exact:
    /// only the two catalog values are accepted.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(Self::Available),
            "Sold Out" => Some(Self::SoldOut),
            _ => None,
        }
    }

    /// Convert to the stored string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::SoldOut => "Sold Out",
        }
    }

    /// Check if a copy with this status can be sold
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// All statuses, in the order the status picker lists them
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Available, Self::SoldOut]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            InstanceStatus::from_str("Available"),
            Some(InstanceStatus::Available)
        );
        assert_eq!(
            InstanceStatus::from_str("Sold Out"),
            Some(InstanceStatus::SoldOut)
        );
        assert_eq!(InstanceStatus::from_str("available"), None);
        assert_eq!(InstanceStatus::from_str("SoldOut"), None);
        assert_eq!(InstanceStatus::from_str(""), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(InstanceStatus::Available.as_str(), "Available");
        assert_eq!(InstanceStatus::SoldOut.as_str(), "Sold Out");
    }

    #[test]
    fn test_is_available() {
        assert!(InstanceStatus::Available.is_available());
        assert!(!InstanceStatus::SoldOut.is_available());
    }

    #[test]
    fn test_default() {
        assert_eq!(InstanceStatus::default(), InstanceStatus::Available);
    }
}
