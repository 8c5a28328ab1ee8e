use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileRow};

/// Fetches a user's profile row, if one has ever been saved.
pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
    Ok(
        sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// Upserts a user's profile, replacing the stored row wholesale. There is
/// no partial merge and no versioning; last write wins.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &Profile,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO profiles
            (user_id, full_name, email, phone, university, degree,
             graduation_year, skills, certificates, work_experience, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            email = EXCLUDED.email,
            phone = EXCLUDED.phone,
            university = EXCLUDED.university,
            degree = EXCLUDED.degree,
            graduation_year = EXCLUDED.graduation_year,
            skills = EXCLUDED.skills,
            certificates = EXCLUDED.certificates,
            work_experience = EXCLUDED.work_experience,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(&profile.full_name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.university)
    .bind(&profile.degree)
    .bind(profile.graduation_year)
    .bind(&profile.skills)
    .bind(&profile.certificates)
    .bind(&profile.work_experience)
    .execute(pool)
    .await?;

    info!("Saved profile for user {user_id}");
    Ok(())
}
