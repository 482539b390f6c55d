//! Operation failures
//!
//! Every registry operation returns either its value or exactly one of these.
//! They are final outcomes: nothing is written when one is returned, and
//! retrying the same call against the same state yields the same error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    #[error("user is already registered")]
    UserAlreadyExists,

    #[error("user is not registered")]
    UserNotFound,

    #[error("expert is already verified")]
    ExpertAlreadyVerified,

    #[error("caller is not a verified expert")]
    ExpertNotVerified,

    #[error("routine template not found")]
    RoutineNotFound,

    #[error("weather data out of range")]
    InvalidWeatherData,

    #[error("rating must be between 1 and 100")]
    InvalidRating,

    #[error("recommendation not found")]
    RecommendationNotFound,

    #[error("recommendation already has feedback")]
    AlreadyRated,

    #[error("{field} value {value:?} is not in the allowed list")]
    InvalidProfileAttribute { field: &'static str, value: String },
}

impl RegistryError {
    /// Stable numeric code for hosts that report failures as integers
    pub fn code(&self) -> u32 {
        match self {
            RegistryError::NotAuthorized => 100,
            RegistryError::UserAlreadyExists => 101,
            RegistryError::UserNotFound => 102,
            RegistryError::ExpertAlreadyVerified => 103,
            RegistryError::ExpertNotVerified => 104,
            RegistryError::RoutineNotFound => 105,
            RegistryError::InvalidWeatherData => 106,
            RegistryError::InvalidRating => 107,
            RegistryError::RecommendationNotFound => 108,
            RegistryError::AlreadyRated => 109,
            RegistryError::InvalidProfileAttribute { .. } => 110,
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_unique() {
        let errors = [
            RegistryError::NotAuthorized,
            RegistryError::UserAlreadyExists,
            RegistryError::UserNotFound,
            RegistryError::ExpertAlreadyVerified,
            RegistryError::ExpertNotVerified,
            RegistryError::RoutineNotFound,
            RegistryError::InvalidWeatherData,
            RegistryError::InvalidRating,
            RegistryError::RecommendationNotFound,
            RegistryError::AlreadyRated,
            RegistryError::InvalidProfileAttribute {
                field: "goal",
                value: "tan".to_string(),
            },
        ];
        let mut codes: Vec<u32> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display() {
        let err = RegistryError::InvalidProfileAttribute {
            field: "skin_type",
            value: "scaly".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "skin_type value \"scaly\" is not in the allowed list"
        );
    }
}
