//! Registry data models
//!
//! Contains the records kept by the registry:
//! - Bounded text and list values used by every record
//! - Caller identities and per-call context
//! - User profiles, expert records and validity lists
//! - Routine templates and their weather windows
//! - Recommendations and feedback

pub mod bounded;
pub mod identity;
pub mod profile;
pub mod recommendation;
pub mod routine;

pub use bounded::{
    Attribute, AttributeList, BoundedList, BoundedText, BoundsError, Comments, Credentials,
    Description, Instructions, ProductType, RoutineName, StepList, ValidityList,
};
pub use identity::{CallContext, Identity};
pub use profile::{ExpertRecord, UserProfile, ValidityLists};
pub use recommendation::{
    Feedback, Recommendation, RecommendationId, RecommendationState, WeatherContext,
};
pub use routine::{NewRoutine, RoutineId, RoutineStep, RoutineTemplate, WeatherWindow};
