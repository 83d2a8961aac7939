use sqlx::SqliteConnection;

use super::customers::is_unique_violation;
use crate::{
    db_types::{Establishment, EstablishmentUpdate, NewEstablishment},
    order_objects::Pagination,
    traits::AccountApiError,
};

pub async fn insert_establishment(
    establishment: &NewEstablishment,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Establishment, AccountApiError> {
    let result = sqlx::query_as::<_, Establishment>(
        r#"INSERT INTO establishments (name, password_hash)
        VALUES ($1, $2)
        RETURNING *"#,
    )
    .bind(&establishment.name)
    .bind(password_hash)
    .fetch_one(conn)
    .await;
    match result {
        Ok(establishment) => Ok(establishment),
        Err(e) if is_unique_violation(&e) => Err(AccountApiError::NameAlreadyTaken(establishment.name.clone())),
        Err(e) => Err(e.into()),
    }
}

pub async fn establishment_by_id(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Establishment>, AccountApiError> {
    let establishment = sqlx::query_as::<_, Establishment>("SELECT * FROM establishments WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(establishment)
}

pub async fn establishment_by_name(
    name: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Establishment>, AccountApiError> {
    let establishment = sqlx::query_as::<_, Establishment>("SELECT * FROM establishments WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(establishment)
}

pub async fn fetch_establishments(
    pagination: &Pagination,
    conn: &mut SqliteConnection,
) -> Result<(Vec<Establishment>, u64), AccountApiError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM establishments").fetch_one(&mut *conn).await?;
    let establishments =
        sqlx::query_as::<_, Establishment>("SELECT * FROM establishments ORDER BY id LIMIT $1 OFFSET $2")
            .bind(pagination.limit as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(conn)
            .await?;
    Ok((establishments, total as u64))
}

pub async fn update_establishment(
    id: i64,
    update: &EstablishmentUpdate,
    conn: &mut SqliteConnection,
) -> Result<Establishment, AccountApiError> {
    let establishment = sqlx::query_as::<_, Establishment>(
        r#"UPDATE establishments SET
            name = COALESCE($2, name),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *"#,
    )
    .bind(id)
    .bind(&update.name)
    .fetch_optional(conn)
    .await?;
    establishment.ok_or(AccountApiError::NotFound)
}

pub async fn delete_establishment(id: i64, conn: &mut SqliteConnection) -> Result<(), AccountApiError> {
    let result = sqlx::query("DELETE FROM establishments WHERE id = $1").bind(id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(AccountApiError::NotFound);
    }
    Ok(())
}
