//! Routine templates
//!
//! Templates are authored by verified experts and carry the weather window
//! they are meant for plus an ordered list of steps.

use serde::{Deserialize, Serialize};

use super::bounded::{
    AttributeList, Description, Instructions, ProductType, RoutineName, StepList,
};
use super::identity::Identity;

pub type RoutineId = u64;

/// Acceptable weather range for a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherWindow {
    pub min_temp: i32,
    pub max_temp: i32,
    pub min_humidity: u32,
    pub max_humidity: u32,
    pub max_uv_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutineStep {
    pub order: u32,
    pub product_type: ProductType,
    pub instructions: Instructions,
}

/// Expert-supplied fields of a routine template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoutine {
    pub name: RoutineName,
    pub description: Description,
    pub skin_types: AttributeList,
    pub concerns: AttributeList,
    pub weather: WeatherWindow,
    pub steps: StepList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    pub expert: Identity,
    pub name: RoutineName,
    pub description: Description,
    pub skin_types: AttributeList,
    pub concerns: AttributeList,
    pub weather: WeatherWindow,
    pub steps: StepList,
    pub created_at: u64,
    pub rating_count: u64,
    /// 0-100 integer running mean of all feedback ratings
    pub average_rating: u32,
}

impl RoutineTemplate {
    /// Fresh template with no ratings yet
    pub fn from_submission(expert: Identity, routine: NewRoutine, created_at: u64) -> Self {
        Self {
            expert,
            name: routine.name,
            description: routine.description,
            skin_types: routine.skin_types,
            concerns: routine.concerns,
            weather: routine.weather,
            steps: routine.steps,
            created_at,
            rating_count: 0,
            average_rating: 0,
        }
    }
}
