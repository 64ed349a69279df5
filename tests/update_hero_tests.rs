/// Update hero tests
///
/// Optimistic-lock behavior, scalar and association updates, and the
/// precedence between the uniqueness check and the token check.
/// Run with: cargo test --test update_hero_tests

use std::collections::BTreeSet;

use chrono::NaiveDate;
use herodex::{
    seed, CreateHeroRequest, HeroCatalog, HeroDto, OpContext, OpStatus, UpdateHeroRequest,
    VersionToken,
};

async fn setup(hero_name: &str) -> (HeroCatalog, OpContext, HeroDto) {
    let catalog = HeroCatalog::in_memory();
    seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();
    let ctx = OpContext::new();
    let hero = catalog
        .create_hero(&ctx, create_request(hero_name))
        .await
        .into_data()
        .unwrap();
    (catalog, ctx, hero)
}

fn create_request(hero_name: &str) -> CreateHeroRequest {
    CreateHeroRequest {
        name: format!("Alias of {hero_name}"),
        hero_name: hero_name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1988, 2, 29).unwrap(),
        height_m: 1.82,
        weight_kg: 85.0,
        power_ids: vec![1, 2],
    }
}

fn update_from(hero: &HeroDto, power_ids: Vec<i64>) -> UpdateHeroRequest {
    UpdateHeroRequest {
        id: hero.id,
        name: hero.name.clone(),
        hero_name: hero.hero_name.clone(),
        birth_date: hero.birth_date,
        height_m: hero.height_m,
        weight_kg: hero.weight_kg,
        power_ids,
        version: VersionToken::from_base64(&hero.version).unwrap(),
    }
}

#[tokio::test]
async fn test_update_with_fresh_token_succeeds() {
    let (catalog, ctx, hero) = setup("Moon Knight").await;

    let mut req = update_from(&hero, vec![2, 3]);
    req.weight_kg = 88.5;
    let result = catalog.update_hero(&ctx, req).await;
    assert!(result.success, "{}", result.message);
    assert_eq!(result.status, OpStatus::Ok);
    assert_eq!(result.message, "Hero updated successfully.");

    let updated = result.data.unwrap();
    assert_eq!(updated.weight_kg, 88.5);
    assert_eq!(updated.power_ids(), BTreeSet::from([2, 3]));
    // Every successful update rotates the token.
    assert_ne!(updated.version, hero.version);
}

#[tokio::test]
async fn test_noop_update_still_rotates_the_token() {
    let (catalog, ctx, hero) = setup("Vision").await;

    let req = update_from(&hero, vec![1, 2]);
    let updated = catalog.update_hero(&ctx, req).await.into_data().unwrap();
    assert_ne!(updated.version, hero.version);
    assert_eq!(updated.power_ids(), hero.power_ids());
}

#[tokio::test]
async fn test_stale_token_is_a_conflict_and_changes_nothing() {
    let (catalog, ctx, hero) = setup("Moon Knight").await;

    let mut first = update_from(&hero, vec![2, 3]);
    first.weight_kg = 88.5;
    assert!(catalog.update_hero(&ctx, first).await.success);

    // Replay with the token from before the first update.
    let mut second = update_from(&hero, vec![1]);
    second.weight_kg = 60.0;
    let result = catalog.update_hero(&ctx, second).await;
    assert!(!result.success);
    assert_eq!(result.status, OpStatus::Conflict);
    assert_eq!(result.status.code(), 409);
    assert_eq!(
        result.message,
        "Concurrency conflict: the record was modified by another process."
    );

    // The loser's intended changes were not applied.
    let current = catalog.get_hero(&ctx, hero.id).await.into_data().unwrap();
    assert_eq!(current.weight_kg, 88.5);
    assert_eq!(current.power_ids(), BTreeSet::from([2, 3]));
}

#[tokio::test]
async fn test_rename_to_taken_name_is_a_conflict() {
    let (catalog, ctx, _scarlet) = setup("Scarlet Witch").await;
    let quicksilver = catalog
        .create_hero(&ctx, create_request("Quicksilver"))
        .await
        .into_data()
        .unwrap();

    let mut req = update_from(&quicksilver, vec![1]);
    req.hero_name = "Scarlet Witch".to_string();
    let result = catalog.update_hero(&ctx, req).await;
    assert_eq!(result.status, OpStatus::Conflict);
    assert_eq!(result.message, "A hero with this hero name already exists.");

    // The rename did not go through.
    let current = catalog
        .get_hero(&ctx, quicksilver.id)
        .await
        .into_data()
        .unwrap();
    assert_eq!(current.hero_name, "Quicksilver");
}

#[tokio::test]
async fn test_taken_name_is_reported_even_with_a_stale_token() {
    let (catalog, ctx, _scarlet) = setup("Scarlet Witch").await;
    let quicksilver = catalog
        .create_hero(&ctx, create_request("Quicksilver"))
        .await
        .into_data()
        .unwrap();

    // Rotate the token so the saved one goes stale.
    assert!(
        catalog
            .update_hero(&ctx, update_from(&quicksilver, vec![1]))
            .await
            .success
    );

    // Stale token AND a taken name: the name conflict is the one reported.
    let mut req = update_from(&quicksilver, vec![1]);
    req.hero_name = "Scarlet Witch".to_string();
    let result = catalog.update_hero(&ctx, req).await;
    assert_eq!(result.status, OpStatus::Conflict);
    assert_eq!(result.message, "A hero with this hero name already exists.");
}

#[tokio::test]
async fn test_empty_power_list_removes_every_association() {
    let (catalog, ctx, hero) = setup("Black Widow").await;

    let updated = catalog
        .update_hero(&ctx, update_from(&hero, Vec::new()))
        .await
        .into_data()
        .unwrap();
    assert!(updated.powers.is_empty());

    let fetched = catalog.get_hero(&ctx, hero.id).await.into_data().unwrap();
    assert!(fetched.powers.is_empty());
}

#[tokio::test]
async fn test_power_replacement_is_idempotent() {
    let (catalog, ctx, hero) = setup("Iceman").await;

    let once = catalog
        .update_hero(&ctx, update_from(&hero, vec![3, 4, 4]))
        .await
        .into_data()
        .unwrap();
    assert_eq!(once.power_ids(), BTreeSet::from([3, 4]));

    // Same desired set again, with the fresh token.
    let twice = catalog
        .update_hero(&ctx, update_from(&once, vec![3, 4]))
        .await
        .into_data()
        .unwrap();
    assert_eq!(twice.power_ids(), BTreeSet::from([3, 4]));
}

#[tokio::test]
async fn test_unknown_power_ids_are_dropped_on_update() {
    let (catalog, ctx, hero) = setup("Beast").await;

    let updated = catalog
        .update_hero(&ctx, update_from(&hero, vec![2, 9999]))
        .await
        .into_data()
        .unwrap();
    assert_eq!(updated.power_ids(), BTreeSet::from([2]));
}

#[tokio::test]
async fn test_update_of_missing_hero_is_not_found() {
    let (catalog, ctx, hero) = setup("Cable").await;

    let mut req = update_from(&hero, vec![1]);
    req.id = hero.id + 1000;
    let result = catalog.update_hero(&ctx, req).await;
    assert_eq!(result.status, OpStatus::NotFound);
    assert_eq!(result.status.code(), 404);
    assert_eq!(result.message, "Hero not found.");
}

#[tokio::test]
async fn test_update_rejects_bad_requests() {
    let (catalog, ctx, hero) = setup("Gambit").await;

    let mut bad_id = update_from(&hero, vec![1]);
    bad_id.id = 0;
    assert_eq!(
        catalog.update_hero(&ctx, bad_id).await.status,
        OpStatus::InvalidArgument
    );

    let mut no_token = update_from(&hero, vec![1]);
    no_token.version = VersionToken::from_bytes(Vec::new());
    assert_eq!(
        catalog.update_hero(&ctx, no_token).await.status,
        OpStatus::InvalidArgument
    );

    let mut blank_name = update_from(&hero, vec![1]);
    blank_name.name = String::new();
    assert_eq!(
        catalog.update_hero(&ctx, blank_name).await.status,
        OpStatus::InvalidArgument
    );
}
