//! Protocol Operations
//!
//! Entry points of the registry. Each one checks its caller and
//! preconditions against the store, then applies all of its writes. Nothing
//! is written until every check has passed, so a returned error means the
//! store is exactly as it was before the call.

use tracing::{debug, info, warn};

use crate::models::{
    Attribute, AttributeList, CallContext, Comments, Credentials, ExpertRecord, Feedback,
    Identity, NewRoutine, Recommendation, RecommendationId, RoutineId, RoutineTemplate,
    UserProfile, ValidityLists, WeatherContext,
};
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::matching::MatchingStrategy;
use crate::registry::store::{MemoryStore, RegistryStore};
use crate::registry::validation::{
    is_admin, is_registered_user, is_verified_expert, validate_profile_attributes,
    validate_rating, validate_weather, weather_window_matches,
};
use crate::reputation::{rate_expert, rate_routine, INITIAL_EXPERT_SCORE};

/// Behavior switches for a registry instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Reject profile attributes missing from the validity lists
    pub enforce_validity_lists: bool,
    pub matching: MatchingStrategy,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            enforce_validity_lists: true,
            matching: MatchingStrategy::default(),
        }
    }
}

/// The registry state machine
pub struct Registry<S: RegistryStore = MemoryStore> {
    store: S,
    options: RegistryOptions,
    /// Highest clock value seen so far
    last_clock: u64,
}

impl Registry<MemoryStore> {
    /// Fresh in-memory registry administered by `deployer`
    pub fn new(deployer: Identity, validity_lists: ValidityLists, options: RegistryOptions) -> Self {
        Self::with_store(MemoryStore::new(deployer, validity_lists), options)
    }
}

impl<S: RegistryStore> Registry<S> {
    pub fn with_store(store: S, options: RegistryOptions) -> Self {
        Self {
            store,
            options,
            last_clock: 0,
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_clock(&self) -> u64 {
        self.last_clock
    }

    pub(crate) fn resume_clock(&mut self, clock: u64) {
        self.last_clock = clock;
    }

    /// Record the host clock once a call has passed its checks; a regression
    /// is reported but not rejected
    fn observe_clock(&mut self, ctx: &CallContext) {
        if ctx.now < self.last_clock {
            warn!(
                now = ctx.now,
                last_seen = self.last_clock,
                caller = %ctx.caller,
                "Host clock moved backwards"
            );
        } else {
            self.last_clock = ctx.now;
        }
    }

    fn require_admin(&self, ctx: &CallContext, operation: &'static str) -> RegistryResult<()> {
        if is_admin(&self.store, &ctx.caller) {
            return Ok(());
        }
        warn!(caller = %ctx.caller, operation, "Rejected non-admin caller");
        Err(RegistryError::NotAuthorized)
    }

    fn check_profile(
        &self,
        skin_type: &Attribute,
        concerns: &AttributeList,
        goals: &AttributeList,
    ) -> RegistryResult<()> {
        if self.options.enforce_validity_lists {
            validate_profile_attributes(self.store.validity_lists(), skin_type, concerns, goals)?;
        }
        Ok(())
    }

    // Admin

    /// Hand the admin role to `new_admin`
    pub fn set_admin(&mut self, ctx: &CallContext, new_admin: Identity) -> RegistryResult<()> {
        self.require_admin(ctx, "set_admin")?;

        self.observe_clock(ctx);
        info!(from = %ctx.caller, to = %new_admin, "Admin transferred");
        self.store.set_admin(new_admin);
        Ok(())
    }

    /// Admit `expert` with the given credentials and the initial reputation
    pub fn verify_expert(
        &mut self,
        ctx: &CallContext,
        expert: Identity,
        credentials: Credentials,
    ) -> RegistryResult<()> {
        self.require_admin(ctx, "verify_expert")?;

        if is_verified_expert(&self.store, &expert) {
            return Err(RegistryError::ExpertAlreadyVerified);
        }

        self.observe_clock(ctx);
        info!(expert = %expert, verified_at = ctx.now, "Expert verified");
        self.store.put_expert(
            expert,
            ExpertRecord {
                verified_at: ctx.now,
                credentials,
                reputation_score: INITIAL_EXPERT_SCORE,
            },
        );
        Ok(())
    }

    // Users

    pub fn register_user(
        &mut self,
        ctx: &CallContext,
        skin_type: Attribute,
        concerns: AttributeList,
        goals: AttributeList,
    ) -> RegistryResult<()> {
        if is_registered_user(&self.store, &ctx.caller) {
            return Err(RegistryError::UserAlreadyExists);
        }
        self.check_profile(&skin_type, &concerns, &goals)?;

        self.observe_clock(ctx);
        info!(user = %ctx.caller, skin_type = %skin_type, "User registered");
        self.store.put_user(
            ctx.caller.clone(),
            UserProfile {
                skin_type,
                concerns,
                goals,
                registered_at: ctx.now,
            },
        );
        Ok(())
    }

    /// Replace the caller's skin type, concerns and goals
    pub fn update_user_profile(
        &mut self,
        ctx: &CallContext,
        skin_type: Attribute,
        concerns: AttributeList,
        goals: AttributeList,
    ) -> RegistryResult<()> {
        let registered_at = self
            .store
            .user(&ctx.caller)
            .map(|profile| profile.registered_at)
            .ok_or(RegistryError::UserNotFound)?;
        self.check_profile(&skin_type, &concerns, &goals)?;

        self.observe_clock(ctx);
        info!(user = %ctx.caller, skin_type = %skin_type, "User profile updated");
        self.store.put_user(
            ctx.caller.clone(),
            UserProfile {
                skin_type,
                concerns,
                goals,
                registered_at,
            },
        );
        Ok(())
    }

    // Routines

    /// Store a new template owned by the calling expert and return its ID
    pub fn submit_routine_template(
        &mut self,
        ctx: &CallContext,
        routine: NewRoutine,
    ) -> RegistryResult<RoutineId> {
        if !is_verified_expert(&self.store, &ctx.caller) {
            warn!(caller = %ctx.caller, "Routine submitted by unverified caller");
            return Err(RegistryError::ExpertNotVerified);
        }

        self.observe_clock(ctx);
        let id = self.store.take_routine_id();
        info!(
            routine_id = id,
            expert = %ctx.caller,
            name = %routine.name,
            steps = routine.steps.len(),
            "Routine template submitted"
        );
        self.store.put_routine(
            id,
            RoutineTemplate::from_submission(ctx.caller.clone(), routine, ctx.now),
        );
        Ok(id)
    }

    // Recommendations

    /// Recommend a routine for the caller under the given weather
    pub fn generate_recommendation(
        &mut self,
        ctx: &CallContext,
        temperature: i32,
        humidity: u32,
        uv_index: u32,
    ) -> RegistryResult<RecommendationId> {
        let profile = self
            .store
            .user(&ctx.caller)
            .ok_or(RegistryError::UserNotFound)?;
        validate_weather(temperature, humidity, uv_index)?;

        let weather = WeatherContext {
            temperature,
            humidity,
            uv_index,
            timestamp: ctx.now,
        };
        let routine_id = self.options.matching.select(&self.store, profile, &weather)?;

        self.observe_clock(ctx);
        let id = self.store.take_recommendation_id();
        info!(
            recommendation_id = id,
            routine_id,
            user = %ctx.caller,
            temperature,
            humidity,
            uv_index,
            "Recommendation generated"
        );
        self.store.put_recommendation(
            id,
            Recommendation {
                user: ctx.caller.clone(),
                routine_id,
                weather,
                recommended_at: ctx.now,
                has_feedback: false,
            },
        );
        Ok(id)
    }

    /// Routine the caller would be recommended; writes nothing.
    /// Weather values are not range-checked here.
    pub fn find_best_routine(
        &self,
        ctx: &CallContext,
        temperature: i32,
        humidity: u32,
        uv_index: u32,
    ) -> RegistryResult<RoutineId> {
        let profile = self
            .store
            .user(&ctx.caller)
            .ok_or(RegistryError::UserNotFound)?;

        let weather = WeatherContext {
            temperature,
            humidity,
            uv_index,
            timestamp: ctx.now,
        };
        self.options.matching.select(&self.store, profile, &weather)
    }

    // Feedback

    /// Rate a recommendation and feed the rating into routine and expert reputation.
    ///
    /// Only the user the recommendation was made for may rate it, and only once.
    /// Returns `true` once the feedback is recorded.
    pub fn submit_feedback(
        &mut self,
        ctx: &CallContext,
        recommendation_id: RecommendationId,
        rating: u32,
        comments: Option<Comments>,
    ) -> RegistryResult<bool> {
        let recommendation = self
            .store
            .recommendation(recommendation_id)
            .ok_or(RegistryError::RecommendationNotFound)?;

        if recommendation.user != ctx.caller {
            warn!(
                recommendation_id,
                caller = %ctx.caller,
                "Feedback from a user other than the recommendation target"
            );
            return Err(RegistryError::NotAuthorized);
        }
        if recommendation.has_feedback {
            return Err(RegistryError::AlreadyRated);
        }
        validate_rating(rating)?;

        let routine_id = recommendation.routine_id;
        let routine = self
            .store
            .routine(routine_id)
            .ok_or(RegistryError::RoutineNotFound)?;
        // Templates are only accepted from verified experts and experts are never removed
        let expert = self
            .store
            .expert(&routine.expert)
            .ok_or(RegistryError::ExpertNotVerified)?;

        let expert_id = routine.expert.clone();
        let rated_routine = rate_routine(routine, rating);
        let rated_expert = rate_expert(expert, rating);
        let rated_recommendation = Recommendation {
            has_feedback: true,
            ..recommendation.clone()
        };

        debug!(
            routine_id,
            rating,
            average_before = routine.average_rating,
            average_after = rated_routine.average_rating,
            expert = %expert_id,
            score_before = expert.reputation_score,
            score_after = rated_expert.reputation_score,
            "Computed reputation updates"
        );

        self.observe_clock(ctx);
        self.store
            .put_recommendation(recommendation_id, rated_recommendation);
        self.store.put_feedback(
            recommendation_id,
            Feedback {
                user: ctx.caller.clone(),
                rating,
                comments,
                submitted_at: ctx.now,
            },
        );
        self.store.put_routine(routine_id, rated_routine);
        self.store.put_expert(expert_id, rated_expert);

        info!(recommendation_id, routine_id, rating, user = %ctx.caller, "Feedback recorded");
        Ok(true)
    }

    // Queries

    pub fn admin(&self) -> &Identity {
        self.store.admin()
    }

    pub fn validity_lists(&self) -> &ValidityLists {
        self.store.validity_lists()
    }

    pub fn user_profile(&self, user: &Identity) -> Option<&UserProfile> {
        self.store.user(user)
    }

    pub fn expert(&self, expert: &Identity) -> Option<&ExpertRecord> {
        self.store.expert(expert)
    }

    pub fn is_verified_expert(&self, expert: &Identity) -> bool {
        is_verified_expert(&self.store, expert)
    }

    pub fn routine(&self, id: RoutineId) -> Option<&RoutineTemplate> {
        self.store.routine(id)
    }

    pub fn recommendation(&self, id: RecommendationId) -> Option<&Recommendation> {
        self.store.recommendation(id)
    }

    pub fn feedback(&self, id: RecommendationId) -> Option<&Feedback> {
        self.store.feedback(id)
    }

    pub fn next_routine_id(&self) -> RoutineId {
        self.store.peek_routine_id()
    }

    pub fn next_recommendation_id(&self) -> RecommendationId {
        self.store.peek_recommendation_id()
    }

    /// Whether `weather` falls inside the stored routine's window
    pub fn is_weather_suitable(
        &self,
        weather: &WeatherContext,
        routine_id: RoutineId,
    ) -> RegistryResult<bool> {
        let routine = self
            .store
            .routine(routine_id)
            .ok_or(RegistryError::RoutineNotFound)?;
        Ok(weather_window_matches(weather, &routine.weather))
    }
}
