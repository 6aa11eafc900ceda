use crate::models::{DbAnimal, DbUser};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_animals_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbAnimal>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let animals = sqlx::query_as::<_, DbAnimal>(
        r#"
        SELECT id, name
        FROM animals
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(animals)
}

pub async fn get_users_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbUser>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, username, first_name, last_name, email
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(users)
}
