/*!
 * Yield Hooks
 * Voluntary preemption at race-prone points of the list operations
 */

use crate::core::errors::ConfigError;
use std::fmt;
use std::thread;

/// Race-prone point inside a list operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldPoint {
    /// Sentinel initialization and the gap between search and splice
    Insert = 0b001,
    /// Between link validation and unlink
    Delete = 0b010,
    /// Every traversal step of lookup and length
    Lookup = 0b100,
}

impl YieldPoint {
    const ALL: [(YieldPoint, char); 3] = [
        (YieldPoint::Insert, 'i'),
        (YieldPoint::Delete, 'd'),
        (YieldPoint::Lookup, 'l'),
    ];
}

/// Set of active yield points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YieldPoints(u8);

impl YieldPoints {
    pub const NONE: YieldPoints = YieldPoints(0);
    pub const ALL: YieldPoints = YieldPoints(0b111);

    /// Parse letters `i`, `d` and `l` in any order
    pub fn parse(letters: &str) -> Result<Self, ConfigError> {
        if letters == "none" {
            return Ok(Self::NONE);
        }
        letters.chars().try_fold(Self::NONE, |set, c| {
            YieldPoint::ALL
                .iter()
                .find(|(_, letter)| *letter == c)
                .map(|(point, _)| set.with(*point))
                .ok_or(ConfigError::InvalidYield(c))
        })
    }

    #[inline]
    pub const fn with(self, point: YieldPoint) -> Self {
        Self(self.0 | point as u8)
    }

    #[inline(always)]
    pub const fn contains(self, point: YieldPoint) -> bool {
        self.0 & point as u8 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Give up the CPU if `point` is active
    #[inline(always)]
    pub fn fire(self, point: YieldPoint) {
        if self.contains(point) {
            thread::yield_now();
        }
    }
}

impl fmt::Display for YieldPoints {
    /// `none`, or the active letters in `idl` order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (point, letter) in YieldPoint::ALL {
            if self.contains(point) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letters() {
        let set = YieldPoints::parse("ld").unwrap();
        assert!(set.contains(YieldPoint::Lookup));
        assert!(set.contains(YieldPoint::Delete));
        assert!(!set.contains(YieldPoint::Insert));
    }

    #[test]
    fn test_label_is_canonical_order() {
        assert_eq!(YieldPoints::parse("ldi").unwrap().to_string(), "idl");
        assert_eq!(YieldPoints::parse("").unwrap().to_string(), "none");
        assert_eq!(YieldPoints::parse("none").unwrap(), YieldPoints::NONE);
        assert_eq!(YieldPoints::ALL.to_string(), "idl");
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            YieldPoints::parse("ix"),
            Err(ConfigError::InvalidYield('x'))
        );
    }
}
