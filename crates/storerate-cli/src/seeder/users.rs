//! User seeding: store owners and normal users with fake names.

use fake::Fake;
use fake::faker::address::en::{CityName, StreetName, StreetSuffix};
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use storerate_auth::UserRole;

use super::models::UserSeed;

pub(crate) const NAME_MIN_LENGTH: usize = 20;
pub(crate) const NAME_MAX_LENGTH: usize = 60;

/// Joins random name parts until the result is long enough for the
/// 20 character minimum, then cuts at a word boundary below 60.
pub(crate) fn long_name(mut next_part: impl FnMut() -> String) -> String {
    let mut name = String::new();
    while name.len() < NAME_MIN_LENGTH {
        for word in next_part().split_whitespace() {
            let word: String = word.chars().filter(|c| c.is_ascii_alphabetic()).collect();
            if word.is_empty() {
                continue;
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(&word);
        }
    }

    while name.len() > NAME_MAX_LENGTH {
        match name.rfind(' ') {
            Some(idx) if idx >= NAME_MIN_LENGTH => name.truncate(idx),
            _ => name.truncate(NAME_MAX_LENGTH),
        }
    }
    name.trim_end().to_string()
}

pub(crate) fn fake_address() -> String {
    let number: u16 = (1..9999).fake();
    let street: String = StreetName().fake();
    let suffix: String = StreetSuffix().fake();
    let city: String = CityName().fake();
    format!("{} {} {}, {}", number, street, suffix, city)
}

fn person_name() -> String {
    let mut parts = 0usize;
    long_name(|| {
        parts += 1;
        if parts % 2 == 1 {
            FirstName().fake()
        } else {
            LastName().fake()
        }
    })
}

/// Generates users of one role in parallel.
///
/// Emails carry the role and index so repeated runs with different counts stay unique
/// within a run; `ON CONFLICT` skips collisions with earlier runs.
pub fn generate_users(role: UserRole, count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name = person_name();
            let first = name
                .split_whitespace()
                .next()
                .unwrap_or("user")
                .to_lowercase();

            UserSeed {
                email: format!("{}+{}{}@example.com", first, role.as_str(), idx),
                name,
                password_hash: password_hash.to_string(),
                address: fake_address(),
                role,
            }
        })
        .collect()
}

/// Inserts users in batches and returns the ids of the rows actually created.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let mut tx = db.begin().await?;

    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    let mut ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, password, address, role) VALUES ");

    for (i, _) in users.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }

    query.push_str(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let mut q = sqlx::query_scalar::<_, i32>(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.address)
            .bind(user.role);
    }

    let ids = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}
