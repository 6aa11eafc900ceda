use crate::models::DbSlot;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn insert_slot(pool: &Pool<Postgres>, slot: &DbSlot) -> Result<DbSlot> {
    tracing::debug!("Inserting slot: id={}, animal_id={}", slot.id, slot.animal_id);

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO walk_slots (id, animal_id, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, animal_id, start_time, end_time, created_at
        "#,
    )
    .bind(slot.id)
    .bind(slot.animal_id)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(slot.created_at)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, animal_id, start_time, end_time, created_at
        FROM walk_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Rewrites animal and times; `created_at` is left as stored.
pub async fn update_slot(pool: &Pool<Postgres>, slot: &DbSlot) -> Result<Option<DbSlot>> {
    tracing::debug!("Updating slot: id={}", slot.id);

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE walk_slots
        SET animal_id = $2, start_time = $3, end_time = $4
        WHERE id = $1
        RETURNING id, animal_id, start_time, end_time, created_at
        "#,
    )
    .bind(slot.id)
    .bind(slot.animal_id)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM walk_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_slots(pool: &Pool<Postgres>, animal_id: Option<Uuid>) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, animal_id, start_time, end_time, created_at
        FROM walk_slots
        WHERE ($1::uuid IS NULL OR animal_id = $1)
        ORDER BY start_time ASC, id ASC
        "#,
    )
    .bind(animal_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}
