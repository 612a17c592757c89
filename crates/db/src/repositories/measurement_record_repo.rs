//! Repository for the `measurement_records` table.

use carbontune_core::record::date_added_for;
use carbontune_core::types::DbId;
use sqlx::PgPool;

use crate::models::measurement_record::{
    CreateMeasurementRecord, MeasurementRecord, UpdateMeasurementRecord,
};

/// Column list for measurement_records queries.
const COLUMNS: &str = "id, model, task, gpu, energy, emissions, runtime, github_user, \
    date_added, \"timestamp\", gpu_location, code_environment, remarks, created_at, updated_at";

/// Provides CRUD operations for measurement records.
pub struct MeasurementRecordRepo;

impl MeasurementRecordRepo {
    /// Insert a new record, stamping `date_added` with today's UTC date.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMeasurementRecord,
    ) -> Result<MeasurementRecord, sqlx::Error> {
        let date_added = date_added_for(chrono::Utc::now());
        let query = format!(
            "INSERT INTO measurement_records
                (model, task, gpu, energy, emissions, runtime, github_user, date_added,
                 \"timestamp\", gpu_location, code_environment, remarks)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MeasurementRecord>(&query)
            .bind(&input.model)
            .bind(&input.task)
            .bind(&input.gpu)
            .bind(input.energy)
            .bind(input.emissions)
            .bind(input.runtime)
            .bind(&input.github_user)
            .bind(date_added)
            .bind(&input.timestamp)
            .bind(&input.gpu_location)
            .bind(&input.code_environment)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MeasurementRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM measurement_records WHERE id = $1");
        sqlx::query_as::<_, MeasurementRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every record in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<MeasurementRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM measurement_records ORDER BY id");
        sqlx::query_as::<_, MeasurementRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update, returning the updated row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMeasurementRecord,
    ) -> Result<Option<MeasurementRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE measurement_records SET
                model = COALESCE($2, model),
                task = COALESCE($3, task),
                gpu = COALESCE($4, gpu),
                energy = COALESCE($5, energy),
                emissions = COALESCE($6, emissions),
                runtime = COALESCE($7, runtime),
                github_user = COALESCE($8, github_user),
                date_added = COALESCE($9, date_added),
                \"timestamp\" = COALESCE($10, \"timestamp\"),
                gpu_location = COALESCE($11, gpu_location),
                code_environment = COALESCE($12, code_environment),
                remarks = COALESCE($13, remarks),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MeasurementRecord>(&query)
            .bind(id)
            .bind(&input.model)
            .bind(&input.task)
            .bind(&input.gpu)
            .bind(input.energy)
            .bind(input.emissions)
            .bind(input.runtime)
            .bind(&input.github_user)
            .bind(&input.date_added)
            .bind(&input.timestamp)
            .bind(&input.gpu_location)
            .bind(&input.code_environment)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record, returning the row as it was before deletion.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MeasurementRecord>, sqlx::Error> {
        let query = format!("DELETE FROM measurement_records WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MeasurementRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
