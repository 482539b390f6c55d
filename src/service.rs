//! Shared registry handle
//!
//! Hosts that call the registry from several tasks share one `RegistryService`.
//! Every mutating operation holds the write lock from its first check to its
//! last write, which gives the one-at-a-time ordering the registry relies on.
//! Queries take the read lock and return owned copies.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::config::RegistryConfig;
use crate::models::{
    Attribute, AttributeList, CallContext, Comments, Credentials, ExpertRecord, Feedback,
    Identity, NewRoutine, Recommendation, RecommendationId, RoutineId, RoutineTemplate,
    UserProfile, WeatherContext,
};
use crate::registry::{Registry, RegistryResult, RegistrySnapshot};

#[derive(Clone)]
pub struct RegistryService {
    registry: Arc<RwLock<Registry>>,
}

impl RegistryService {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    /// Build an empty registry from configuration; rejects an invalid config
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;

        let registry = Registry::new(
            config.admin_identity(),
            config.validity_lists()?,
            config.to_options()?,
        );

        info!(
            admin = %config.registry.admin,
            matching = %registry.options().matching,
            enforce_validity_lists = config.registry.enforce_validity_lists,
            "Registry initialized"
        );

        Ok(Self::new(registry))
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn set_admin(&self, ctx: &CallContext, new_admin: Identity) -> RegistryResult<()> {
        self.registry.write().await.set_admin(ctx, new_admin)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn verify_expert(
        &self,
        ctx: &CallContext,
        expert: Identity,
        credentials: Credentials,
    ) -> RegistryResult<()> {
        self.registry
            .write()
            .await
            .verify_expert(ctx, expert, credentials)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn register_user(
        &self,
        ctx: &CallContext,
        skin_type: Attribute,
        concerns: AttributeList,
        goals: AttributeList,
    ) -> RegistryResult<()> {
        self.registry
            .write()
            .await
            .register_user(ctx, skin_type, concerns, goals)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn update_user_profile(
        &self,
        ctx: &CallContext,
        skin_type: Attribute,
        concerns: AttributeList,
        goals: AttributeList,
    ) -> RegistryResult<()> {
        self.registry
            .write()
            .await
            .update_user_profile(ctx, skin_type, concerns, goals)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn submit_routine_template(
        &self,
        ctx: &CallContext,
        routine: NewRoutine,
    ) -> RegistryResult<RoutineId> {
        self.registry
            .write()
            .await
            .submit_routine_template(ctx, routine)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn generate_recommendation(
        &self,
        ctx: &CallContext,
        temperature: i32,
        humidity: u32,
        uv_index: u32,
    ) -> RegistryResult<RecommendationId> {
        self.registry
            .write()
            .await
            .generate_recommendation(ctx, temperature, humidity, uv_index)
    }

    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub async fn find_best_routine(
        &self,
        ctx: &CallContext,
        temperature: i32,
        humidity: u32,
        uv_index: u32,
    ) -> RegistryResult<RoutineId> {
        self.registry
            .read()
            .await
            .find_best_routine(ctx, temperature, humidity, uv_index)
    }

    #[instrument(skip(self, ctx, comments), fields(caller = %ctx.caller))]
    pub async fn submit_feedback(
        &self,
        ctx: &CallContext,
        recommendation_id: RecommendationId,
        rating: u32,
        comments: Option<Comments>,
    ) -> RegistryResult<bool> {
        self.registry
            .write()
            .await
            .submit_feedback(ctx, recommendation_id, rating, comments)
    }

    pub async fn admin(&self) -> Identity {
        self.registry.read().await.admin().clone()
    }

    pub async fn user_profile(&self, user: &Identity) -> Option<UserProfile> {
        self.registry.read().await.user_profile(user).cloned()
    }

    pub async fn expert(&self, expert: &Identity) -> Option<ExpertRecord> {
        self.registry.read().await.expert(expert).cloned()
    }

    pub async fn routine(&self, id: RoutineId) -> Option<RoutineTemplate> {
        self.registry.read().await.routine(id).cloned()
    }

    pub async fn recommendation(&self, id: RecommendationId) -> Option<Recommendation> {
        self.registry.read().await.recommendation(id).cloned()
    }

    pub async fn feedback(&self, id: RecommendationId) -> Option<Feedback> {
        self.registry.read().await.feedback(id).cloned()
    }

    pub async fn is_weather_suitable(
        &self,
        weather: &WeatherContext,
        routine_id: RoutineId,
    ) -> RegistryResult<bool> {
        self.registry
            .read()
            .await
            .is_weather_suitable(weather, routine_id)
    }

    pub async fn snapshot(&self) -> RegistrySnapshot {
        self.registry.read().await.snapshot()
    }
}
