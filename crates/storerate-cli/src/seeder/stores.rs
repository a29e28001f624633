//! Store seeding. Each seeded owner receives exactly one store.

use fake::Fake;
use fake::faker::company::en::{CompanyName, Industry};
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

use super::models::StoreSeed;
use super::users::{fake_address, long_name};

fn store_name() -> String {
    let mut parts = 0usize;
    long_name(|| {
        parts += 1;
        match parts {
            1 => CompanyName().fake(),
            2 => Industry().fake(),
            _ => "Store".to_string(),
        }
    })
}

pub fn generate_stores(owner_ids: &[i32]) -> Vec<StoreSeed> {
    owner_ids
        .par_iter()
        .map(|&owner_id| StoreSeed {
            name: store_name(),
            email: format!("store{}@example.com", owner_id),
            address: fake_address(),
            owner_id,
        })
        .collect()
}

pub async fn insert_stores_batch(
    db: &PgPool,
    stores: &[StoreSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if stores.is_empty() {
        return Ok(Vec::new());
    }

    let start_time = Instant::now();

    let mut query = String::from("INSERT INTO stores (name, email, address, owner_id) VALUES ");
    for (i, _) in stores.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }
    query.push_str(" ON CONFLICT DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, i32>(&query);
    for store in stores {
        q = q
            .bind(&store.name)
            .bind(&store.email)
            .bind(&store.address)
            .bind(store.owner_id);
    }
    let ids = q.fetch_all(db).await?;

    println!(
        "   ✓ Inserted {} stores in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}
