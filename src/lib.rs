//! Skincare Routine Registry
//!
//! Reputation-backed registry that matches expert-authored skincare routines
//! to user profiles and weather, and feeds user ratings back into routine and
//! expert reputation.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          - Crate root with re-exports
//! ├── config.rs       - Configuration management
//! ├── telemetry.rs    - Logging setup
//! ├── service.rs      - Shared async handle over one registry
//! ├── models/         - Records and bounded values
//! │   ├── bounded.rs        - Length-checked text and lists
//! │   ├── identity.rs       - Caller identity, call context
//! │   ├── profile.rs        - Users, experts, validity lists
//! │   ├── routine.rs        - Routine templates, weather windows
//! │   └── recommendation.rs - Recommendations, feedback
//! ├── registry/       - State machine
//! │   ├── operations.rs - Public operations
//! │   ├── validation.rs - Range and role checks
//! │   ├── matching.rs   - Routine selection
//! │   ├── store.rs      - Keyed maps and ID counters
//! │   ├── snapshot.rs   - Whole-state export/restore
//! │   └── error.rs      - Operation failures
//! └── reputation/     - Expert EMA, routine running mean
//! ```

pub mod config;
pub mod models;
pub mod registry;
pub mod reputation;
pub mod service;
pub mod telemetry;

// Re-export main types for convenience
pub use config::{LoggingConfig, RegistryConfig};
pub use models::{
    Attribute, AttributeList, BoundsError, CallContext, Comments, Credentials, ExpertRecord,
    Feedback, Identity, NewRoutine, Recommendation, RecommendationId, RecommendationState,
    RoutineId, RoutineStep, RoutineTemplate, UserProfile, ValidityLists, WeatherContext,
    WeatherWindow,
};
pub use registry::{
    MatchingStrategy, MemoryStore, Registry, RegistryError, RegistryOptions, RegistryResult,
    RegistrySnapshot, RegistryStore,
};
pub use reputation::{RoutineRating, INITIAL_EXPERT_SCORE};
pub use service::RegistryService;
