use sqlx::SqliteConnection;

use super::customers::is_unique_violation;
use crate::{
    db_types::{Association, Courier, CourierUpdate, NewCourier},
    order_objects::Pagination,
    traits::AccountApiError,
};

pub async fn insert_courier(
    courier: &NewCourier,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Courier, AccountApiError> {
    let result = sqlx::query_as::<_, Courier>(
        r#"INSERT INTO couriers (name, password_hash, vehicle_plate, vehicle_type, vehicle_color)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *"#,
    )
    .bind(&courier.name)
    .bind(password_hash)
    .bind(&courier.vehicle_plate)
    .bind(&courier.vehicle_type)
    .bind(&courier.vehicle_color)
    .fetch_one(conn)
    .await;
    match result {
        Ok(courier) => Ok(courier),
        Err(e) if is_unique_violation(&e) => Err(AccountApiError::NameAlreadyTaken(courier.name.clone())),
        Err(e) => Err(e.into()),
    }
}

pub async fn courier_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Courier>, AccountApiError> {
    let courier =
        sqlx::query_as::<_, Courier>("SELECT * FROM couriers WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(courier)
}

pub async fn courier_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Courier>, AccountApiError> {
    let courier =
        sqlx::query_as::<_, Courier>("SELECT * FROM couriers WHERE name = $1").bind(name).fetch_optional(conn).await?;
    Ok(courier)
}

pub async fn fetch_couriers(
    pagination: &Pagination,
    conn: &mut SqliteConnection,
) -> Result<(Vec<Courier>, u64), AccountApiError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM couriers").fetch_one(&mut *conn).await?;
    let couriers = sqlx::query_as::<_, Courier>("SELECT * FROM couriers ORDER BY id LIMIT $1 OFFSET $2")
        .bind(pagination.limit as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(conn)
        .await?;
    Ok((couriers, total as u64))
}

pub async fn update_courier(
    id: i64,
    update: &CourierUpdate,
    conn: &mut SqliteConnection,
) -> Result<Courier, AccountApiError> {
    let courier = sqlx::query_as::<_, Courier>(
        r#"UPDATE couriers SET
            name = COALESCE($2, name),
            vehicle_plate = COALESCE($3, vehicle_plate),
            vehicle_type = COALESCE($4, vehicle_type),
            vehicle_color = COALESCE($5, vehicle_color),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *"#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.vehicle_plate)
    .bind(&update.vehicle_type)
    .bind(&update.vehicle_color)
    .fetch_optional(conn)
    .await?;
    courier.ok_or(AccountApiError::NotFound)
}

pub async fn delete_courier(id: i64, conn: &mut SqliteConnection) -> Result<(), AccountApiError> {
    let result = sqlx::query("DELETE FROM couriers WHERE id = $1").bind(id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(AccountApiError::NotFound);
    }
    Ok(())
}

pub async fn set_courier_availability(
    id: i64,
    available: bool,
    conn: &mut SqliteConnection,
) -> Result<Courier, AccountApiError> {
    let courier = sqlx::query_as::<_, Courier>(
        "UPDATE couriers SET available = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(available)
    .fetch_optional(conn)
    .await?;
    courier.ok_or(AccountApiError::NotFound)
}

/// Inserts a `pending` association, or leaves the existing row for the pair untouched.
pub async fn request_association(
    courier_id: i64,
    establishment_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Association, AccountApiError> {
    sqlx::query(
        r#"INSERT INTO courier_associations (courier_id, establishment_id, status)
        VALUES ($1, $2, 'pending')
        ON CONFLICT (courier_id, establishment_id) DO NOTHING"#,
    )
    .bind(courier_id)
    .bind(establishment_id)
    .execute(&mut *conn)
    .await?;
    fetch_association(courier_id, establishment_id, conn).await?.ok_or(AccountApiError::NotFound)
}

/// Upserts the association straight to `approved`.
pub async fn approve_association(
    establishment_id: i64,
    courier_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Association, AccountApiError> {
    let association = sqlx::query_as::<_, Association>(
        r#"INSERT INTO courier_associations (courier_id, establishment_id, status)
        VALUES ($1, $2, 'approved')
        ON CONFLICT (courier_id, establishment_id)
        DO UPDATE SET status = 'approved', updated_at = CURRENT_TIMESTAMP
        RETURNING *"#,
    )
    .bind(courier_id)
    .bind(establishment_id)
    .fetch_one(conn)
    .await?;
    Ok(association)
}

pub async fn fetch_association(
    courier_id: i64,
    establishment_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Association>, AccountApiError> {
    let association = sqlx::query_as::<_, Association>(
        "SELECT * FROM courier_associations WHERE courier_id = $1 AND establishment_id = $2",
    )
    .bind(courier_id)
    .bind(establishment_id)
    .fetch_optional(conn)
    .await?;
    Ok(association)
}
