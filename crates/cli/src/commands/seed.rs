//! Demo data seeding command.
//!
//! Inserts a small catalog, a hero carousel, and a main message so a fresh
//! environment has something to render.

use rust_decimal::Decimal;
use tracing::info;

use cyna_core::{CurrencyCode, MessageSeverity};
use cyna_server::db::content::SlideInput;
use cyna_server::db::{self, CategoryRepository, ContentRepository, ProductRepository};

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    stock: i32,
}

struct DemoCategory {
    name: &'static str,
    description: &'static str,
    products: &'static [DemoProduct],
}

const DEMO_CATALOG: &[DemoCategory] = &[
    DemoCategory {
        name: "Endpoint Protection",
        description: "Agents and sensors for workstations and servers.",
        products: &[
            DemoProduct {
                name: "EDR Sentinel",
                description: "Endpoint detection and response, per-seat license.",
                price_cents: 4999,
                stock: 500,
            },
            DemoProduct {
                name: "Patch Pilot",
                description: "Automated patch management for mixed fleets.",
                price_cents: 1999,
                stock: 500,
            },
        ],
    },
    DemoCategory {
        name: "Network Security",
        description: "Perimeter and internal network defenses.",
        products: &[
            DemoProduct {
                name: "FluxGate Firewall",
                description: "Managed next-generation firewall appliance.",
                price_cents: 89_900,
                stock: 25,
            },
            DemoProduct {
                name: "DNS Shield",
                description: "Protective DNS resolution, per-site subscription.",
                price_cents: 2900,
                stock: 1000,
            },
        ],
    },
    DemoCategory {
        name: "Audits & Training",
        description: "Human-side security services.",
        products: &[DemoProduct {
            name: "Phishing Drill Pack",
            description: "Quarterly simulated phishing campaigns with reporting.",
            price_cents: 14_900,
            stock: 100,
        }],
    },
];

/// Seed demo catalog and marketing content.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let mut product_count = 0usize;
    for (index, demo_category) in DEMO_CATALOG.iter().enumerate() {
        let category = categories
            .create(
                demo_category.name,
                demo_category.description,
                None,
                i32::try_from(index).unwrap_or(0),
            )
            .await?;

        for demo_product in demo_category.products {
            products
                .create(
                    category.id,
                    demo_product.name,
                    demo_product.description,
                    Decimal::new(demo_product.price_cents, 2),
                    CurrencyCode::EUR,
                    demo_product.stock,
                    None,
                )
                .await?;
            product_count += 1;
        }
    }

    info!(
        categories = DEMO_CATALOG.len(),
        products = product_count,
        "catalog seeded"
    );

    let content = ContentRepository::new(&pool);
    content
        .create_slide(SlideInput {
            title: "Security that ships with you",
            subtitle: "Protect endpoints, networks, and people from one place.",
            image_url: "/static/hero/endpoint.jpg",
            link_url: Some("/products"),
            sort_order: 0,
            active: true,
        })
        .await?;
    content
        .create_slide(SlideInput {
            title: "New: Phishing Drill Pack",
            subtitle: "Train your team with quarterly simulated campaigns.",
            image_url: "/static/hero/training.jpg",
            link_url: Some("/products"),
            sort_order: 1,
            active: true,
        })
        .await?;

    content
        .set_message(
            "Summer promotion: 20% off all training packs until August 31.",
            MessageSeverity::Promo,
            true,
        )
        .await?;

    info!("marketing content seeded");
    Ok(())
}
