use chrono::Utc;

use crate::core::types::HeroId;
use crate::model::{CreateHeroRequest, HeroDraft, ListHeroesQuery, UpdateHeroRequest};
use crate::ops::error::OpError;

pub(crate) const MAX_NAME_LEN: usize = 120;
pub(crate) const DEFAULT_PAGE: u32 = 1;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 20;
pub(crate) const MAX_PAGE_SIZE: u32 = 100;

/// Checks a create request and produces the draft that will be persisted.
/// Names are trimmed before any length or uniqueness comparison.
pub(crate) fn validate_create(req: &CreateHeroRequest) -> Result<HeroDraft, OpError> {
    if req.power_ids.is_empty() {
        return Err(OpError::invalid("At least one superpower must be selected."));
    }
    draft_from_fields(
        &req.name,
        &req.hero_name,
        req.birth_date,
        req.height_m,
        req.weight_kg,
    )
}

pub(crate) fn validate_hero_id(id: HeroId) -> Result<(), OpError> {
    if id <= 0 {
        return Err(OpError::invalid("Hero id must be a positive number."));
    }
    Ok(())
}

/// Checks an update request. Unlike create, an empty power list is legal and
/// means "remove every power".
pub(crate) fn validate_update(req: &UpdateHeroRequest) -> Result<HeroDraft, OpError> {
    validate_hero_id(req.id)?;
    if req.version.is_empty() {
        return Err(OpError::invalid("Version token must not be empty."));
    }
    draft_from_fields(
        &req.name,
        &req.hero_name,
        req.birth_date,
        req.height_m,
        req.weight_kg,
    )
}

fn draft_from_fields(
    name: &str,
    hero_name: &str,
    birth_date: chrono::NaiveDate,
    height_m: f64,
    weight_kg: f64,
) -> Result<HeroDraft, OpError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OpError::invalid("Name must not be blank."));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(OpError::invalid(format!(
            "Name must be at most {MAX_NAME_LEN} characters."
        )));
    }

    let hero_name = hero_name.trim();
    if hero_name.is_empty() {
        return Err(OpError::invalid("Hero name must not be blank."));
    }
    if hero_name.chars().count() > MAX_NAME_LEN {
        return Err(OpError::invalid(format!(
            "Hero name must be at most {MAX_NAME_LEN} characters."
        )));
    }

    if birth_date > Utc::now().date_naive() {
        return Err(OpError::invalid("Birth date cannot be in the future."));
    }

    if !height_m.is_finite() || height_m <= 0.0 {
        return Err(OpError::invalid("Height must be a positive number."));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(OpError::invalid("Weight must be a positive number."));
    }

    Ok(HeroDraft {
        name: name.to_string(),
        hero_name: hero_name.to_string(),
        birth_date,
        height_m,
        weight_kg,
    })
}

/// Normalizes a listing query: missing page/page_size fall back to defaults,
/// out-of-range values are clamped, and a blank search term counts as absent.
pub(crate) fn normalize_query(query: &ListHeroesQuery) -> (u32, u32, Option<String>) {
    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string);
    (page, page_size, search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use crate::core::token::VersionToken;

    fn create_request() -> CreateHeroRequest {
        CreateHeroRequest {
            name: "  Diana Prince  ".to_string(),
            hero_name: "Wonder Woman".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 3, 22).unwrap(),
            height_m: 1.78,
            weight_kg: 74.0,
            power_ids: vec![1, 2],
        }
    }

    #[test]
    fn valid_create_trims_names() {
        let draft = validate_create(&create_request()).unwrap();
        assert_eq!(draft.name, "Diana Prince");
        assert_eq!(draft.hero_name, "Wonder Woman");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut req = create_request();
        req.name = "   ".to_string();
        let err = validate_create(&req).unwrap_err();
        assert!(matches!(err, OpError::Invalid(ref m) if m.contains("blank")));
    }

    #[test]
    fn overlong_hero_name_is_rejected() {
        let mut req = create_request();
        req.hero_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let mut req = create_request();
        req.birth_date = Utc::now().date_naive() + Duration::days(1);
        let err = validate_create(&req).unwrap_err();
        assert!(matches!(err, OpError::Invalid(ref m) if m.contains("future")));
    }

    #[test]
    fn non_positive_and_non_finite_measurements_are_rejected() {
        for bad in [0.0, -1.2, f64::NAN, f64::INFINITY] {
            let mut req = create_request();
            req.height_m = bad;
            assert!(validate_create(&req).is_err(), "height {bad} should fail");
            let mut req = create_request();
            req.weight_kg = bad;
            assert!(validate_create(&req).is_err(), "weight {bad} should fail");
        }
    }

    #[test]
    fn create_requires_at_least_one_power() {
        let mut req = create_request();
        req.power_ids.clear();
        let err = validate_create(&req).unwrap_err();
        assert!(matches!(err, OpError::Invalid(ref m) if m.contains("superpower")));
    }

    fn update_request() -> UpdateHeroRequest {
        UpdateHeroRequest {
            id: 5,
            name: "Diana Prince".to_string(),
            hero_name: "Wonder Woman".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 3, 22).unwrap(),
            height_m: 1.78,
            weight_kg: 74.0,
            power_ids: Vec::new(),
            version: VersionToken::from_bytes(vec![1, 2, 3]),
        }
    }

    #[test]
    fn update_allows_an_empty_power_list() {
        assert!(validate_update(&update_request()).is_ok());
    }

    #[test]
    fn update_rejects_non_positive_id_and_empty_token() {
        let mut req = update_request();
        req.id = 0;
        assert!(validate_update(&req).is_err());

        let mut req = update_request();
        req.version = VersionToken::from_bytes(Vec::new());
        assert!(validate_update(&req).is_err());
    }

    #[test]
    fn query_defaults_and_clamps() {
        let (page, size, search) = normalize_query(&ListHeroesQuery::default());
        assert_eq!((page, size), (DEFAULT_PAGE, DEFAULT_PAGE_SIZE));
        assert!(search.is_none());

        let query = ListHeroesQuery {
            page: Some(0),
            page_size: Some(10_000),
            search: Some("   ".to_string()),
        };
        let (page, size, search) = normalize_query(&query);
        assert_eq!((page, size), (1, MAX_PAGE_SIZE));
        assert!(search.is_none());

        let query = ListHeroesQuery {
            page: Some(3),
            page_size: Some(0),
            search: Some("  man  ".to_string()),
        };
        let (page, size, search) = normalize_query(&query);
        assert_eq!((page, size), (3, 1));
        assert_eq!(search.as_deref(), Some("man"));
    }
}
