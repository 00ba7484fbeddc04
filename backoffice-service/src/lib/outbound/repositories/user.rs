use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

const USER_COLUMNS: &str = "id, first_name, last_name, email, hashed_password, role_id, \
     created_by, created_at, updated_by, updated_at, deleted_by, deleted_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
        Ok(User {
            id: UserId(to_u64(row.try_get("id")?)?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
            role_id: RoleId(to_u64(row.try_get("role_id")?)?),
            created_by: UserId(to_u64(row.try_get("created_by")?)?),
            created_at: row.try_get("created_at")?,
            updated_by: to_optional_id(row.try_get("updated_by")?)?,
            updated_at: row.try_get("updated_at")?,
            deleted_by: to_optional_id(row.try_get("deleted_by")?)?,
            deleted_at: row.try_get("deleted_at")?,
        })
    }

    async fn fetch_one_user(
        &self,
        query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    ) -> Result<Option<User>, RepositoryError> {
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.as_ref()
            .map(Self::row_to_user)
            .transpose()
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }
}

fn to_u64(value: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn to_optional_id(value: Option<i64>) -> Result<Option<UserId>, sqlx::Error> {
    value.map(|v| to_u64(v).map(UserId)).transpose()
}

/// Ids beyond `i64::MAX` cannot exist in a `BIGINT` column.
fn to_db_id(id: UserId) -> Option<i64> {
    i64::try_from(id.as_u64()).ok()
}

fn map_write_error(e: sqlx::Error, email: &str) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::EmailAlreadyExists(email.to_string());
        }
    }
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let role_id = i64::try_from(user.role_id.0)
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        let created_by = to_db_id(user.created_by).ok_or_else(|| {
            RepositoryError::DatabaseError(format!("creator id out of range: {}", user.created_by))
        })?;

        let sql = format!(
            r#"
            INSERT INTO users (first_name, last_name, email, hashed_password, role_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(role_id)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        Self::row_to_user(&row).map_err(|e| RepositoryError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let Some(db_id) = to_db_id(id) else {
            return Ok(None);
        };

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        self.fetch_one_user(sqlx::query(&sql).bind(db_id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        self.fetch_one_user(sqlx::query(&sql).bind(email)).await
    }

    async fn update_info(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        let (Some(db_id), Some(acting)) = (to_db_id(id), to_db_id(acting_user_id)) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let sql = format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, updated_by = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        );

        self.fetch_one_user(
            sqlx::query(&sql)
                .bind(db_id)
                .bind(first_name)
                .bind(last_name)
                .bind(acting),
        )
        .await?
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn update_password(
        &self,
        id: UserId,
        hashed_password: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        let (Some(db_id), Some(acting)) = (to_db_id(id), to_db_id(acting_user_id)) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let sql = format!(
            r#"
            UPDATE users
            SET hashed_password = $2, updated_by = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        );

        self.fetch_one_user(
            sqlx::query(&sql)
                .bind(db_id)
                .bind(hashed_password)
                .bind(acting),
        )
        .await?
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn update_email(
        &self,
        id: UserId,
        email: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError> {
        let (Some(db_id), Some(acting)) = (to_db_id(id), to_db_id(acting_user_id)) else {
            return Err(RepositoryError::NotFound(id.to_string()));
        };

        let sql = format!(
            r#"
            UPDATE users
            SET email = $2, updated_by = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(db_id)
            .bind(email)
            .bind(acting)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, email))?;

        match row {
            Some(row) => {
                Self::row_to_user(&row).map_err(|e| RepositoryError::DatabaseError(e.to_string()))
            }
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_db_id_range() {
        assert_eq!(to_db_id(UserId(42)), Some(42));
        assert_eq!(to_db_id(UserId(u64::MAX)), None);
    }

    #[test]
    fn test_negative_ids_do_not_decode() {
        assert!(to_u64(-1).is_err());
        assert_eq!(to_optional_id(None).unwrap(), None);
        assert_eq!(to_optional_id(Some(3)).unwrap(), Some(UserId(3)));
    }
}
