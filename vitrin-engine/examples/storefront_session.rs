//! End-to-end storefront session against the demo catalog
//!
//! ```bash
//! cargo run -p vitrin-engine --example storefront_session
//! ```
//!
//! Run it twice: the second run restores the cart and favorites
//! written by the first.

use anyhow::Context;
use shared::query::{ProductQuery, SortBy};
use shared::types::Locale;
use shared::util::format_price;
use vitrin_engine::catalog::dataset::demo_catalog;
use vitrin_engine::{CartEngine, CatalogStore, FavoritesEngine, StateStore, StoreConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = StoreConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("create data dir {}", config.data_dir.display()))?;

    let store = StateStore::open(config.db_path())?;
    let catalog = CatalogStore::with_config(demo_catalog(), &config)?;
    let cart = CartEngine::restore(store.clone());
    let favorites = FavoritesEngine::restore(store);

    if !cart.is_empty() {
        println!("restored cart from previous session:");
        for line in cart.lines() {
            println!(
                "  {} x{} = {}",
                line.product.name,
                line.quantity,
                format_price(line.variant.price * line.quantity as f64, Locale::Tr)
            );
        }
        println!();
    }

    // Browse: search, then drill into a cheapest-first category page
    println!("search \"kulaklık\":");
    for product in catalog.search("kulaklık") {
        println!("  {}", product.name);
    }

    let page = catalog.query(&ProductQuery {
        category_id: Some(1),
        sort_by: SortBy::PriceLowToHigh,
        ..config.product_query()
    });
    println!(
        "\nelektronik, cheapest first (page {}/{}):",
        page.current_page, page.total_pages
    );
    for product in &page.items {
        let price = product.min_price().unwrap_or(0.0);
        println!("  {} - {}", product.name, format_price(price, Locale::Tr));
    }

    // Shop: two phones and a pair of headphones
    let iphone = catalog
        .product_by_slug("iphone-15-pro-max-256gb")
        .context("demo catalog is missing the iphone")?;
    let headphones = catalog
        .product_by_slug("sony-wh-1000xm5-kablosuz-kulaklik")
        .context("demo catalog is missing the headphones")?;

    let mut events = cart.subscribe();
    cart.add(iphone, &iphone.variants[0], 1);
    cart.add(iphone, &iphone.variants[0], 1);
    cart.add(headphones, &headphones.variants[0], 1);
    while let Ok(event) = events.try_recv() {
        println!("cart event: {event:?}");
    }

    favorites.toggle(iphone.id);

    println!("\ncart: {} items", cart.item_count());
    println!(
        "checkout total: {}",
        format_price(cart.selected_total_price(), Locale::Tr)
    );
    println!("favorites: {:?}", favorites.ids());

    Ok(())
}
