//! User profiles, expert records and attribute reference lists

use serde::{Deserialize, Serialize};

use super::bounded::{Attribute, AttributeList, BoundsError, Credentials, ValidityList};

/// Preference profile of a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub skin_type: Attribute,
    pub concerns: AttributeList,
    pub goals: AttributeList,
    /// Clock value at registration; kept across profile updates
    pub registered_at: u64,
}

/// An admin-verified expert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertRecord {
    pub verified_at: u64,
    pub credentials: Credentials,
    /// 0-100, changed only by feedback on the expert's routines
    pub reputation_score: u32,
}

/// Reference lists of allowed skin types, concerns and goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityLists {
    pub skin_types: ValidityList,
    pub concerns: ValidityList,
    pub goals: ValidityList,
}

pub const DEFAULT_SKIN_TYPES: [&str; 5] = ["normal", "dry", "oily", "combination", "sensitive"];

pub const DEFAULT_CONCERNS: [&str; 10] = [
    "acne",
    "aging",
    "dryness",
    "hyperpigmentation",
    "redness",
    "sensitivity",
    "dullness",
    "large-pores",
    "oiliness",
    "dark-circles",
];

pub const DEFAULT_GOALS: [&str; 10] = [
    "hydration",
    "anti-aging",
    "clear-skin",
    "brightening",
    "even-tone",
    "oil-control",
    "soothing",
    "sun-protection",
    "barrier-repair",
    "firmness",
];

impl ValidityLists {
    pub fn from_strs<S: AsRef<str>>(
        skin_types: &[S],
        concerns: &[S],
        goals: &[S],
    ) -> Result<Self, BoundsError> {
        Ok(Self {
            skin_types: ValidityList::from_strs(skin_types)?,
            concerns: ValidityList::from_strs(concerns)?,
            goals: ValidityList::from_strs(goals)?,
        })
    }
}

impl Default for ValidityLists {
    fn default() -> Self {
        let skin_types = DEFAULT_SKIN_TYPES.iter().map(|s| Attribute::new(*s));
        let concerns = DEFAULT_CONCERNS.iter().map(|s| Attribute::new(*s));
        let goals = DEFAULT_GOALS.iter().map(|s| Attribute::new(*s));

        // Built-in labels are short and at most ten per list
        Self {
            skin_types: ValidityList::new(skin_types.flatten().collect()).unwrap_or_default(),
            concerns: ValidityList::new(concerns.flatten().collect()).unwrap_or_default(),
            goals: ValidityList::new(goals.flatten().collect()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_complete() {
        let lists = ValidityLists::default();
        assert_eq!(lists.skin_types.len(), DEFAULT_SKIN_TYPES.len());
        assert_eq!(lists.concerns.len(), DEFAULT_CONCERNS.len());
        assert_eq!(lists.goals.len(), DEFAULT_GOALS.len());
        assert!(lists.skin_types.contains_str("oily"));
        assert!(lists.concerns.contains_str("acne"));
        assert!(lists.goals.contains_str("hydration"));
    }

    #[test]
    fn test_from_strs_rejects_eleven_entries() {
        let eleven: Vec<String> = (0..11).map(|i| format!("t{}", i)).collect();
        let one = vec!["x".to_string()];
        assert!(ValidityLists::from_strs(&eleven, &one, &one).is_err());
    }
}
