use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

/// Partial unique index that lets one request at a time hold a slot.
pub const SLOT_HOLDER_INDEX: &str = "uq_reservation_requests_slot_holder";

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Directory tables. In a shelter deployment these already exist and are
    // owned by the animal and user registries; they are only read here.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS animals (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(255) NOT NULL UNIQUE,
            first_name VARCHAR(255) NOT NULL DEFAULT '',
            last_name VARCHAR(255) NOT NULL DEFAULT '',
            email VARCHAR(255) NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Slot times are shelter-local wall clock, hence no time zone.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS walk_slots (
            id UUID PRIMARY KEY,
            animal_id UUID NOT NULL,
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            created_at TIMESTAMP NOT NULL,
            CONSTRAINT valid_time_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No foreign key to walk_slots: requests outlive slot deletion.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservation_requests (
            id UUID PRIMARY KEY,
            slot_id UUID NOT NULL,
            requester_id UUID NOT NULL,
            request_date TIMESTAMP NOT NULL,
            status SMALLINT NOT NULL DEFAULT 0,
            CONSTRAINT valid_status CHECK (status BETWEEN 0 AND 5)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // A slot is held by its PENDING, APPROVED, IN_PROGRESS or COMPLETED
    // request. The older index only covered the first three.
    pool.execute(
        r#"
        DROP INDEX IF EXISTS uq_reservation_requests_active_slot;
        CREATE UNIQUE INDEX IF NOT EXISTS uq_reservation_requests_slot_holder
            ON reservation_requests(slot_id)
            WHERE status IN (0, 1, 3, 4);
        "#,
    )
    .await?;

    // Several statements at once need the simple query protocol.
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_walk_slots_animal_id ON walk_slots(animal_id);
        CREATE INDEX IF NOT EXISTS idx_walk_slots_start_time ON walk_slots(start_time);
        CREATE INDEX IF NOT EXISTS idx_reservation_requests_slot_id ON reservation_requests(slot_id);
        CREATE INDEX IF NOT EXISTS idx_reservation_requests_requester_id ON reservation_requests(requester_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
