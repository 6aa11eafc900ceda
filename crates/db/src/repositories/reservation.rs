use crate::models::DbReservationRequest;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Inserts the request only if its slot exists. Returns `None` when the slot
/// is missing; a second request holding the slot fails on the
/// `uq_reservation_requests_slot_holder` index.
pub async fn insert_request(
    pool: &Pool<Postgres>,
    request: &DbReservationRequest,
) -> Result<Option<DbReservationRequest>> {
    tracing::debug!(
        "Inserting reservation request: id={}, slot_id={}, requester_id={}",
        request.id,
        request.slot_id,
        request.requester_id
    );

    let request = sqlx::query_as::<_, DbReservationRequest>(
        r#"
        INSERT INTO reservation_requests (id, slot_id, requester_id, request_date, status)
        SELECT $1, $2, $3, $4, $5
        WHERE EXISTS (SELECT 1 FROM walk_slots WHERE id = $2)
        RETURNING id, slot_id, requester_id, request_date, status
        "#,
    )
    .bind(request.id)
    .bind(request.slot_id)
    .bind(request.requester_id)
    .bind(request.request_date)
    .bind(request.status)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn get_request_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbReservationRequest>> {
    let request = sqlx::query_as::<_, DbReservationRequest>(
        r#"
        SELECT id, slot_id, requester_id, request_date, status
        FROM reservation_requests
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

/// Sets `status` to `new` only while it still equals `expected`.
pub async fn compare_and_set_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: i16,
    new: i16,
) -> Result<Option<DbReservationRequest>> {
    tracing::debug!(
        "Updating reservation status: id={}, expected={}, new={}",
        id,
        expected,
        new
    );

    let request = sqlx::query_as::<_, DbReservationRequest>(
        r#"
        UPDATE reservation_requests
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING id, slot_id, requester_id, request_date, status
        "#,
    )
    .bind(id)
    .bind(expected)
    .bind(new)
    .fetch_optional(pool)
    .await?;

    Ok(request)
}

pub async fn delete_request_if_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: i16,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM reservation_requests
        WHERE id = $1 AND status = $2
        "#,
    )
    .bind(id)
    .bind(expected)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_requests(
    pool: &Pool<Postgres>,
    requester_id: Option<Uuid>,
    slot_id: Option<Uuid>,
    statuses: Option<Vec<i16>>,
) -> Result<Vec<DbReservationRequest>> {
    let requests = sqlx::query_as::<_, DbReservationRequest>(
        r#"
        SELECT id, slot_id, requester_id, request_date, status
        FROM reservation_requests
        WHERE ($1::uuid IS NULL OR requester_id = $1)
          AND ($2::uuid IS NULL OR slot_id = $2)
          AND ($3::smallint[] IS NULL OR status = ANY($3))
        ORDER BY request_date ASC, id ASC
        "#,
    )
    .bind(requester_id)
    .bind(slot_id)
    .bind(statuses)
    .fetch_all(pool)
    .await?;

    Ok(requests)
}
