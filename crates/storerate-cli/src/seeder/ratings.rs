//! Rating seeding. Each normal user rates a random subset of stores.

use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use sqlx::PgPool;
use std::time::Instant;

/// (user_id, store_id, rating) triples with at most one rating per pair.
pub fn generate_ratings(
    user_ids: &[i32],
    store_ids: &[i32],
    ratings_per_user: usize,
) -> Vec<(i32, i32, i32)> {
    if store_ids.is_empty() {
        return Vec::new();
    }

    user_ids
        .par_iter()
        .flat_map_iter(|&user_id| {
            let mut rng = rand::thread_rng();
            let count = rng.gen_range(0..=ratings_per_user.min(store_ids.len()));
            store_ids
                .choose_multiple(&mut rng, count)
                .map(|&store_id| (user_id, store_id, rng.gen_range(1..=5)))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn insert_ratings_batch(
    db: &PgPool,
    ratings: &[(i32, i32, i32)],
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;

    const BATCH_SIZE: usize = 2000;

    let mut inserted = 0;
    for chunk in ratings.chunks(BATCH_SIZE) {
        let mut query = String::from("INSERT INTO ratings (user_id, store_id, rating) VALUES ");
        for (i, _) in chunk.iter().enumerate() {
            if i > 0 {
                query.push_str(", ");
            }
            let param_idx = i * 3;
            query.push_str(&format!(
                "(${}, ${}, ${})",
                param_idx + 1,
                param_idx + 2,
                param_idx + 3
            ));
        }
        query.push_str(" ON CONFLICT (user_id, store_id) DO NOTHING");

        let mut q = sqlx::query(&query);
        for (user_id, store_id, rating) in chunk {
            q = q.bind(user_id).bind(store_id).bind(rating);
        }
        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} ratings in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ratings_are_in_range_and_unique_per_pair() {
        let users: Vec<i32> = (1..=40).collect();
        let stores: Vec<i32> = (100..110).collect();
        let ratings = generate_ratings(&users, &stores, 6);

        let mut pairs = HashSet::new();
        for (user_id, store_id, rating) in &ratings {
            assert!((1..=5).contains(rating));
            assert!(stores.contains(store_id));
            assert!(pairs.insert((*user_id, *store_id)));
        }
        assert!(ratings.len() <= users.len() * 6);
    }

    #[test]
    fn test_no_stores_means_no_ratings() {
        assert!(generate_ratings(&[1, 2, 3], &[], 5).is_empty());
    }
}
