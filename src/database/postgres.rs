use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::models::{Employee, EmployeeRow};
use crate::database::store::{EmployeeStore, StoreError};
use crate::filter::{Pagination, StoreQuery};

const COLUMNS: &str =
    "email, name, password, birth_day, birth_month, birth_year, roles, manager";

/// PostgreSQL-backed employee collection: one row per employee in a single
/// table, `email` as the primary key.
pub struct PgEmployeeStore {
    table_name: String,
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(table_name: impl Into<String>, pool: PgPool) -> Result<Self, StoreError> {
        let table_name = table_name.into();
        Self::validate_table_name(&table_name)?;
        Ok(Self { table_name, pool })
    }

    /// Create the table and the manager index if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (
                email TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                password TEXT NOT NULL,
                birth_day TEXT NOT NULL,
                birth_month TEXT NOT NULL,
                birth_year TEXT NOT NULL,
                roles TEXT[] NOT NULL DEFAULT '{{}}',
                manager TEXT NULL
            )",
            self.table_name
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        let create_index = format!(
            "CREATE INDEX IF NOT EXISTS \"{0}_manager_idx\" ON \"{0}\" (manager)",
            self.table_name
        );
        sqlx::query(&create_index).execute(&self.pool).await?;

        info!("Ensured employee table: {}", self.table_name);
        Ok(())
    }

    fn validate_table_name(name: &str) -> Result<(), StoreError> {
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if valid {
            Ok(())
        } else {
            Err(StoreError::QueryError(format!("Invalid table name format: {}", name)))
        }
    }

    fn select_sql(&self, predicate: &str) -> String {
        format!(
            "SELECT {} FROM \"{}\" WHERE {} ORDER BY email COLLATE \"C\" ASC LIMIT $1 OFFSET $2",
            COLUMNS, self.table_name, predicate
        )
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn insert(&self, employee: &Employee) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            self.table_name, COLUMNS
        );
        sqlx::query(&sql)
            .bind(&employee.email)
            .bind(&employee.name)
            .bind(&employee.password)
            .bind(&employee.birthdate.day)
            .bind(&employee.birthdate.month)
            .bind(&employee.birthdate.year)
            .bind(&employee.roles)
            .bind(&employee.manager)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_one(&self, email: &str) -> Result<Option<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM \"{}\" WHERE email = $1", COLUMNS, self.table_name);
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Employee>, StoreError> {
        let sql = format!(
            "SELECT {} FROM \"{}\" WHERE email = $1 AND password = $2",
            COLUMNS, self.table_name
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(email)
            .bind(password)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Employee::from))
    }

    async fn find_page(
        &self,
        query: &StoreQuery,
        page: Pagination,
    ) -> Result<Vec<Employee>, StoreError> {
        let (predicate, argument) = match query {
            StoreQuery::All => ("TRUE", None),
            StoreQuery::EmailDomain(domain) => (
                "right(lower(email), char_length($3) + 1) = '@' || lower($3)",
                Some(domain),
            ),
            StoreQuery::Role(role) => ("$3 = ANY(roles)", Some(role)),
            StoreQuery::Manager(manager) => ("manager = $3", Some(manager)),
        };

        let sql = self.select_sql(predicate);
        debug!("find_page {:?} page={} size={}", query, page.page(), page.size());

        let mut q = sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(to_i64(page.limit()))
            .bind(to_i64(page.skip()));
        if let Some(argument) = argument {
            q = q.bind(argument);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn scan(&self) -> Result<Vec<Employee>, StoreError> {
        let sql = format!("SELECT {} FROM \"{}\"", COLUMNS, self.table_name);
        let employees = sqlx::query_as::<_, EmployeeRow>(&sql)
            .fetch(&self.pool)
            .map_ok(Employee::from)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(employees)
    }

    async fn set_manager(&self, email: &str, manager: Option<&str>) -> Result<bool, StoreError> {
        let sql = format!("UPDATE \"{}\" SET manager = $2 WHERE email = $1", self.table_name);
        let result = sqlx::query(&sql)
            .bind(email)
            .bind(manager)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM \"{}\"", self.table_name);
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool for table: {}", self.table_name);
    }
}
