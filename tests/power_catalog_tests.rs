/// Power catalog tests
///
/// The read-only superpower listing and the seeding helpers behind it.
/// Run with: cargo test --test power_catalog_tests

use herodex::{seed, HeroCatalog, ListHeroesQuery, OpContext, OpStatus};

#[tokio::test]
async fn test_seeded_catalog_lists_every_power_in_id_order() {
    let catalog = HeroCatalog::in_memory();
    seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();
    let ctx = OpContext::new();

    let result = catalog.list_powers(&ctx).await;
    assert!(result.success);
    assert_eq!(result.status, OpStatus::Ok);
    assert_eq!(result.message, "Superpowers retrieved successfully.");

    let powers = result.data.unwrap();
    assert_eq!(powers.len(), seed::DEFAULT_POWERS.len());
    assert_eq!(powers[0].name, "Strength");
    let mut ids: Vec<i64> = powers.iter().map(|p| p.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), powers.len());
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_power_seeding_is_idempotent() {
    let catalog = HeroCatalog::in_memory();
    let first = seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();
    assert_eq!(first, seed::DEFAULT_POWERS.len());

    let second = seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();
    assert_eq!(second, 0);

    let ctx = OpContext::new();
    let powers = catalog.list_powers(&ctx).await.into_data().unwrap();
    assert_eq!(powers.len(), seed::DEFAULT_POWERS.len());
}

#[tokio::test]
async fn test_empty_power_catalog_is_a_plain_success() {
    let catalog = HeroCatalog::in_memory();
    let ctx = OpContext::new();

    // Unlike hero listings, an empty power catalog is not an error.
    let result = catalog.list_powers(&ctx).await;
    assert!(result.success);
    assert_eq!(result.status.code(), 200);
    assert_eq!(result.data.unwrap().len(), 0);
}

#[tokio::test]
async fn test_demo_heroes_seed_on_top_of_the_power_catalog() {
    let catalog = HeroCatalog::in_memory();
    seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();
    let seeded = seed::seed_demo_heroes(catalog.store()).await.unwrap();
    assert_eq!(seeded, seed::DEMO_HEROES.len());

    let ctx = OpContext::new();
    let page = catalog
        .list_heroes(
            &ctx,
            ListHeroesQuery {
                page: Some(1),
                page_size: Some(100),
                search: None,
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(page.total, seed::DEMO_HEROES.len() as u64);
    assert!(page.items.iter().all(|hero| !hero.powers.is_empty()));
}

#[tokio::test]
async fn test_demo_heroes_never_seed_twice() {
    let catalog = HeroCatalog::in_memory();
    seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .unwrap();

    assert!(seed::seed_demo_heroes(catalog.store()).await.unwrap() > 0);
    assert_eq!(seed::seed_demo_heroes(catalog.store()).await.unwrap(), 0);
}
