//! Slot ranges and the results of a draw.

use serde::{Deserialize, Serialize};

use super::error::AssignError;

/// Default lowest door number.
pub const DEFAULT_MIN_SLOT: i64 = 1;

/// Default highest door number.
pub const DEFAULT_MAX_SLOT: i64 = 100;

/// Inclusive range of slot numbers. `min <= max` always holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawRange")]
pub struct AssignmentRange {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawRange> for AssignmentRange {
    type Error = AssignError;

    fn try_from(raw: RawRange) -> std::result::Result<Self, Self::Error> {
        AssignmentRange::new(raw.min, raw.max)
    }
}

impl AssignmentRange {
    /// Build a range, rejecting `min > max`.
    pub fn new(min: i64, max: i64) -> std::result::Result<Self, AssignError> {
        if min > max {
            return Err(AssignError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of slots in the range. Saturates at `u64::MAX` for the one
    /// range (`i64::MIN..=i64::MAX`) whose size does not fit.
    pub fn size(&self) -> u64 {
        u64::try_from(self.span()).unwrap_or(u64::MAX)
    }

    /// Exact number of slots in the range.
    pub(crate) fn span(&self) -> u128 {
        ((self.max as i128) - (self.min as i128) + 1) as u128
    }

    /// Whether `slot` lies inside the range.
    pub fn contains(&self, slot: i64) -> bool {
        (self.min..=self.max).contains(&slot)
    }
}

impl Default for AssignmentRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SLOT,
            max: DEFAULT_MAX_SLOT,
        }
    }
}

impl std::fmt::Display for AssignmentRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// One participant's door in a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
    pub participant_id: String,
    pub name: String,
    pub slot: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        assert_eq!(
            AssignmentRange::new(5, 1),
            Err(AssignError::InvalidRange { min: 5, max: 1 })
        );
    }

    #[test]
    fn test_single_slot_range() {
        let r = AssignmentRange::new(7, 7).unwrap();
        assert_eq!(r.size(), 1);
        assert!(r.contains(7));
        assert!(!r.contains(8));
    }

    #[test]
    fn test_size_handles_negative_bounds() {
        let r = AssignmentRange::new(-3, 2).unwrap();
        assert_eq!(r.size(), 6);
    }

    #[test]
    fn test_size_of_full_i64_range_saturates() {
        let r = AssignmentRange::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(r.size(), u64::MAX);
    }

    #[test]
    fn test_default_range() {
        let r = AssignmentRange::default();
        assert_eq!((r.min(), r.max()), (1, 100));
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let ok: AssignmentRange = serde_json::from_str(r#"{"min":1,"max":3}"#).unwrap();
        assert_eq!(ok.size(), 3);
        assert!(serde_json::from_str::<AssignmentRange>(r#"{"min":4,"max":3}"#).is_err());
    }

    #[test]
    fn test_result_uses_camel_case() {
        let result = AssignmentResult {
            participant_id: "p1".to_string(),
            name: "Alice".to_string(),
            slot: 4,
        };
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["participantId"], "p1");
        assert_eq!(v["slot"], 4);
    }
}
