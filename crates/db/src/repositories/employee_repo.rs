//! Repository for the `employees` table.

use sqlx::{PgConnection, PgPool};

use hrflow_core::types::DbId;

use crate::models::employee::Employee;

/// Column list for employees queries.
const COLUMNS: &str = "id, organization_id, full_name, role, manager_id, \
    created_at, updated_at";

/// Provides read operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Find an employee by their primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `manager_id` is currently recorded as `employee_id`'s line
    /// manager. Evaluated fresh on every authorization check; the
    /// relationship is never cached on a request.
    pub async fn is_manager_of(
        pool: &PgPool,
        manager_id: DbId,
        employee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1 AND manager_id = $2)",
        )
        .bind(employee_id)
        .bind(manager_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Transaction-scoped variant of [`Self::is_manager_of`], used by the
    /// engine inside the decision transaction.
    pub async fn is_manager_of_conn(
        conn: &mut PgConnection,
        manager_id: DbId,
        employee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1 AND manager_id = $2)",
        )
        .bind(employee_id)
        .bind(manager_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }
}
