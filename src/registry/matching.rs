//! Routine selection for recommendations
//!
//! `FixedRoutine` is the compatible behavior: every request resolves to the
//! same template regardless of weather or profile. `WeatherProfile` scans the
//! templates and filters on weather window and profile overlap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{RoutineId, RoutineTemplate, UserProfile, WeatherContext};
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::store::RegistryStore;
use crate::registry::validation::weather_window_matches;

/// Template every fixed-strategy request resolves to
pub const DEFAULT_FIXED_ROUTINE_ID: RoutineId = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchingStrategy {
    /// Always the given routine
    FixedRoutine(RoutineId),
    /// Best-rated routine whose window and attributes fit the request
    WeatherProfile,
}

impl Default for MatchingStrategy {
    fn default() -> Self {
        MatchingStrategy::FixedRoutine(DEFAULT_FIXED_ROUTINE_ID)
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingStrategy::FixedRoutine(id) => write!(f, "fixed({})", id),
            MatchingStrategy::WeatherProfile => write!(f, "weather-profile"),
        }
    }
}

impl FromStr for MatchingStrategy {
    type Err = String;

    /// `fixed` or `weather-profile`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(MatchingStrategy::default()),
            "weather-profile" | "weather_profile" => Ok(MatchingStrategy::WeatherProfile),
            other => Err(format!("unknown matching strategy: {}", other)),
        }
    }
}

impl MatchingStrategy {
    /// Pick the routine for `profile` under `weather`
    pub fn select<S: RegistryStore + ?Sized>(
        &self,
        store: &S,
        profile: &UserProfile,
        weather: &WeatherContext,
    ) -> RegistryResult<RoutineId> {
        match self {
            MatchingStrategy::FixedRoutine(id) => store
                .routine(*id)
                .map(|_| *id)
                .ok_or(RegistryError::RoutineNotFound),
            MatchingStrategy::WeatherProfile => best_match(store, profile, weather),
        }
    }
}

/// Whether a template fits the user and the conditions
pub fn routine_fits(routine: &RoutineTemplate, profile: &UserProfile, weather: &WeatherContext) -> bool {
    let skin_ok = routine.skin_types.is_empty() || routine.skin_types.contains(&profile.skin_type);
    let concerns_ok = routine.concerns.is_empty()
        || routine
            .concerns
            .iter()
            .any(|concern| profile.concerns.contains(concern));

    skin_ok && concerns_ok && weather_window_matches(weather, &routine.weather)
}

/// Highest average rating wins; ties go to the lowest ID
fn best_match<S: RegistryStore + ?Sized>(
    store: &S,
    profile: &UserProfile,
    weather: &WeatherContext,
) -> RegistryResult<RoutineId> {
    let mut best: Option<(RoutineId, u32)> = None;

    // Ascending ID order, so strict > keeps the lowest ID on ties
    for (id, routine) in store.routines() {
        if !routine_fits(routine, profile, weather) {
            continue;
        }
        match best {
            Some((_, average)) if routine.average_rating <= average => {}
            _ => best = Some((id, routine.average_rating)),
        }
    }

    best.map(|(id, _)| id).ok_or(RegistryError::RoutineNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Attribute, AttributeList, Description, Identity, RoutineName, StepList, ValidityLists,
        WeatherWindow,
    };
    use crate::registry::store::MemoryStore;

    fn routine(skin_types: &[&str], concerns: &[&str], max_temp: i32, average: u32) -> RoutineTemplate {
        RoutineTemplate {
            expert: Identity::new("expert"),
            name: RoutineName::new("routine").unwrap(),
            description: Description::new("").unwrap(),
            skin_types: AttributeList::from_strs(skin_types).unwrap(),
            concerns: AttributeList::from_strs(concerns).unwrap(),
            weather: WeatherWindow {
                min_temp: 0,
                max_temp,
                min_humidity: 0,
                max_humidity: 100,
                max_uv_index: 12,
            },
            steps: StepList::empty(),
            created_at: 0,
            rating_count: u64::from(average > 0),
            average_rating: average,
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            skin_type: Attribute::new("oily").unwrap(),
            concerns: AttributeList::from_strs(&["acne"]).unwrap(),
            goals: AttributeList::from_strs(&["hydration"]).unwrap(),
            registered_at: 0,
        }
    }

    fn weather(temperature: i32) -> WeatherContext {
        WeatherContext {
            temperature,
            humidity: 50,
            uv_index: 3,
            timestamp: 0,
        }
    }

    fn store_with(routines: Vec<RoutineTemplate>) -> MemoryStore {
        let mut store = MemoryStore::new(Identity::new("admin"), ValidityLists::default());
        for routine in routines {
            let id = store.take_routine_id();
            store.put_routine(id, routine);
        }
        store
    }

    #[test]
    fn test_fixed_ignores_fit() {
        let store = store_with(vec![routine(&["dry"], &["aging"], 5, 0)]);
        let strategy = MatchingStrategy::default();
        assert_eq!(strategy.select(&store, &profile(), &weather(40)), Ok(1));
    }

    #[test]
    fn test_fixed_missing_routine() {
        let store = store_with(vec![]);
        assert_eq!(
            MatchingStrategy::default().select(&store, &profile(), &weather(20)),
            Err(RegistryError::RoutineNotFound)
        );
    }

    #[test]
    fn test_weather_profile_picks_best_rated_fit() {
        let store = store_with(vec![
            routine(&["oily"], &["acne"], 30, 60),
            routine(&["dry"], &["acne"], 30, 99),
            routine(&["oily", "combination"], &["acne", "redness"], 30, 85),
            routine(&["oily"], &["acne"], 10, 100),
        ]);
        let strategy = MatchingStrategy::WeatherProfile;
        assert_eq!(strategy.select(&store, &profile(), &weather(20)), Ok(3));
    }

    #[test]
    fn test_weather_profile_tie_goes_to_lowest_id() {
        let store = store_with(vec![
            routine(&["dry"], &[], 30, 70),
            routine(&[], &[], 30, 70),
            routine(&["oily"], &[], 30, 70),
        ]);
        assert_eq!(
            MatchingStrategy::WeatherProfile.select(&store, &profile(), &weather(20)),
            Ok(2)
        );
    }

    #[test]
    fn test_weather_profile_no_candidate() {
        let store = store_with(vec![routine(&["oily"], &["acne"], 10, 50)]);
        assert_eq!(
            MatchingStrategy::WeatherProfile.select(&store, &profile(), &weather(20)),
            Err(RegistryError::RoutineNotFound)
        );
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("fixed".parse::<MatchingStrategy>(), Ok(MatchingStrategy::FixedRoutine(1)));
        assert_eq!("Weather-Profile".parse::<MatchingStrategy>(), Ok(MatchingStrategy::WeatherProfile));
        assert!("nearest".parse::<MatchingStrategy>().is_err());
    }
}
