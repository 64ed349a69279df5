use std::sync::Arc;

use anyhow::{Context, Result};
use herodex::{
    seed, AppConfig, CreateHeroRequest, HeroCatalog, ListHeroesQuery, MemoryCatalog, OpContext,
    OpResult, UpdateHeroRequest, VersionToken,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Walks the catalog through its operations and prints every result
/// envelope, including the conflict produced by replaying a stale token.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let store = MemoryCatalog::with_strategy(config.token_strategy);
    info!(strategy = %store.token_strategy(), "starting herodex demo");

    let catalog = HeroCatalog::with_store(Arc::new(store));
    let seeded = seed::seed_powers(catalog.store(), seed::DEFAULT_POWERS)
        .await
        .context("failed to seed the power catalog")?;
    info!(count = seeded, "power catalog ready");

    if config.seed_demo {
        let heroes = seed::seed_demo_heroes(catalog.store())
            .await
            .context("failed to seed demo heroes")?;
        info!(count = heroes, "demo heroes ready");
    }

    let ctx = OpContext::new();

    let powers = catalog.list_powers(&ctx).await;
    print_envelope("superpowers", &powers)?;

    let created = catalog
        .create_hero(
            &ctx,
            CreateHeroRequest {
                name: "Diana Prince".to_string(),
                hero_name: "Wonder Woman".to_string(),
                birth_date: "1985-03-22".parse().context("bad demo date")?,
                height_m: 1.78,
                weight_kg: 74.0,
                power_ids: vec![1, 5],
            },
        )
        .await;
    print_envelope("create hero", &created)?;

    let Some(hero) = created.data else {
        return Ok(());
    };
    let stale_token = VersionToken::from_base64(&hero.version)?;

    let updated = catalog
        .update_hero(
            &ctx,
            UpdateHeroRequest {
                id: hero.id,
                name: hero.name.clone(),
                hero_name: hero.hero_name.clone(),
                birth_date: hero.birth_date,
                height_m: hero.height_m,
                weight_kg: 75.5,
                power_ids: vec![1, 5, 8],
                version: stale_token.clone(),
            },
        )
        .await;
    print_envelope("update hero", &updated)?;

    // Replaying the pre-update token demonstrates the optimistic lock.
    let conflicted = catalog
        .update_hero(
            &ctx,
            UpdateHeroRequest {
                id: hero.id,
                name: hero.name.clone(),
                hero_name: hero.hero_name.clone(),
                birth_date: hero.birth_date,
                height_m: hero.height_m,
                weight_kg: 90.0,
                power_ids: vec![1],
                version: stale_token,
            },
        )
        .await;
    print_envelope("stale update", &conflicted)?;

    let listing = catalog
        .list_heroes(
            &ctx,
            ListHeroesQuery {
                page: Some(1),
                page_size: Some(5),
                search: None,
            },
        )
        .await;
    print_envelope("list heroes", &listing)?;

    let removed = catalog.delete_hero(&ctx, hero.id).await;
    print_envelope("delete hero", &removed)?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("herodex=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn print_envelope<T: Serialize>(label: &str, envelope: &OpResult<T>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(envelope)
        .with_context(|| format!("failed to render the {label} envelope"))?;
    println!("== {label}\n{rendered}");
    Ok(())
}
