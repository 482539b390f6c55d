//! Validation Rules
//!
//! Side-effect-free checks run before any write.

use crate::models::{
    Attribute, AttributeList, Identity, ValidityList, ValidityLists, WeatherContext, WeatherWindow,
};
use crate::registry::error::{RegistryError, RegistryResult};
use crate::registry::store::RegistryStore;

pub const MIN_TEMPERATURE: i32 = -50;
pub const MAX_TEMPERATURE: i32 = 50;
pub const MAX_HUMIDITY: u32 = 100;
pub const MAX_UV_INDEX: u32 = 12;
pub const MIN_RATING: u32 = 1;
pub const MAX_RATING: u32 = 100;

pub fn validate_weather(temperature: i32, humidity: u32, uv_index: u32) -> RegistryResult<()> {
    let valid = (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature)
        && humidity <= MAX_HUMIDITY
        && uv_index <= MAX_UV_INDEX;

    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidWeatherData)
    }
}

pub fn validate_rating(rating: u32) -> RegistryResult<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(RegistryError::InvalidRating)
    }
}

/// True iff the conditions sit inside the routine's weather window
pub fn weather_window_matches(weather: &WeatherContext, window: &WeatherWindow) -> bool {
    weather.temperature >= window.min_temp
        && weather.temperature <= window.max_temp
        && weather.humidity >= window.min_humidity
        && weather.humidity <= window.max_humidity
        && weather.uv_index <= window.max_uv_index
}

pub fn is_admin<S: RegistryStore + ?Sized>(store: &S, caller: &Identity) -> bool {
    store.admin() == caller
}

pub fn is_verified_expert<S: RegistryStore + ?Sized>(store: &S, caller: &Identity) -> bool {
    store.expert(caller).is_some()
}

pub fn is_registered_user<S: RegistryStore + ?Sized>(store: &S, caller: &Identity) -> bool {
    store.user(caller).is_some()
}

/// Check every profile attribute against the reference lists
pub fn validate_profile_attributes(
    lists: &ValidityLists,
    skin_type: &Attribute,
    concerns: &AttributeList,
    goals: &AttributeList,
) -> RegistryResult<()> {
    check_allowed(&lists.skin_types, "skin_type", std::iter::once(skin_type))?;
    check_allowed(&lists.concerns, "concern", concerns.iter())?;
    check_allowed(&lists.goals, "goal", goals.iter())
}

fn check_allowed<'a>(
    allowed: &ValidityList,
    field: &'static str,
    mut values: impl Iterator<Item = &'a Attribute>,
) -> RegistryResult<()> {
    match values.find(|value| !allowed.contains(value)) {
        Some(value) => Err(RegistryError::InvalidProfileAttribute {
            field,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> WeatherWindow {
        WeatherWindow {
            min_temp: 10,
            max_temp: 30,
            min_humidity: 40,
            max_humidity: 80,
            max_uv_index: 6,
        }
    }

    fn weather(temperature: i32, humidity: u32, uv_index: u32) -> WeatherContext {
        WeatherContext {
            temperature,
            humidity,
            uv_index,
            timestamp: 0,
        }
    }

    #[test]
    fn test_weather_bounds_inclusive() {
        assert!(validate_weather(-50, 0, 0).is_ok());
        assert!(validate_weather(50, 100, 12).is_ok());
        assert_eq!(validate_weather(-51, 50, 5), Err(RegistryError::InvalidWeatherData));
        assert_eq!(validate_weather(51, 50, 5), Err(RegistryError::InvalidWeatherData));
        assert_eq!(validate_weather(20, 101, 5), Err(RegistryError::InvalidWeatherData));
        assert_eq!(validate_weather(20, 50, 13), Err(RegistryError::InvalidWeatherData));
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(validate_rating(0), Err(RegistryError::InvalidRating));
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(100).is_ok());
        assert_eq!(validate_rating(101), Err(RegistryError::InvalidRating));
    }

    #[test]
    fn test_window_match() {
        assert!(weather_window_matches(&weather(25, 60, 5), &window()));
        assert!(weather_window_matches(&weather(10, 40, 6), &window()));
        assert!(weather_window_matches(&weather(30, 80, 0), &window()));
        assert!(!weather_window_matches(&weather(9, 60, 5), &window()));
        assert!(!weather_window_matches(&weather(31, 60, 5), &window()));
        assert!(!weather_window_matches(&weather(25, 39, 5), &window()));
        assert!(!weather_window_matches(&weather(25, 81, 5), &window()));
        assert!(!weather_window_matches(&weather(25, 60, 7), &window()));
    }

    #[test]
    fn test_profile_attributes() {
        let lists = ValidityLists::default();
        let oily = Attribute::new("oily").unwrap();
        let acne = AttributeList::from_strs(&["acne"]).unwrap();
        let hydration = AttributeList::from_strs(&["hydration"]).unwrap();
        assert!(validate_profile_attributes(&lists, &oily, &acne, &hydration).is_ok());

        let bad_goals = AttributeList::from_strs(&["hydration", "tanning"]).unwrap();
        assert_eq!(
            validate_profile_attributes(&lists, &oily, &acne, &bad_goals),
            Err(RegistryError::InvalidProfileAttribute {
                field: "goal",
                value: "tanning".to_string(),
            })
        );

        let scaly = Attribute::new("scaly").unwrap();
        assert!(matches!(
            validate_profile_attributes(&lists, &scaly, &acne, &hydration),
            Err(RegistryError::InvalidProfileAttribute { field: "skin_type", .. })
        ));
    }
}
