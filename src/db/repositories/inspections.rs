use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{now_rfc3339, query_optional},
    Database,
};
use crate::models::{InspectionRecord, InspectionStatus};

const INSPECTION_COLUMNS: &str =
    "id, property_id, inspection_date, status, inspection_type, general_observations";

fn row_to_inspection(row: &Row) -> Result<InspectionRecord> {
    Ok(InspectionRecord {
        id: row.get("id")?,
        property_id: row.get("property_id")?,
        inspection_date: row.get("inspection_date")?,
        status: row.get("status")?,
        inspection_type: row.get("inspection_type")?,
        general_observations: row.get("general_observations")?,
    })
}

impl Database {
    pub async fn insert_inspection(&self, inspection: &InspectionRecord) -> Result<()> {
        let record = inspection.clone();
        self.execute(move |conn| {
            let now = now_rfc3339();
            conn.execute(
                "INSERT INTO inspections (id, property_id, inspection_date, status, inspection_type, general_observations, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    record.id,
                    record.property_id,
                    record.inspection_date,
                    record.status,
                    record.inspection_type,
                    record.general_observations,
                    now,
                ],
            )
            .with_context(|| format!("failed to insert inspection {}", record.id))?;
            Ok(())
        })
        .await
    }

    pub async fn get_inspection(&self, inspection_id: &str) -> Result<Option<InspectionRecord>> {
        let inspection_id = inspection_id.to_string();
        self.execute(move |conn| {
            query_optional(
                conn,
                &format!("SELECT {INSPECTION_COLUMNS} FROM inspections WHERE id = ?1"),
                params![inspection_id],
                row_to_inspection,
            )
        })
        .await
    }

    /// Inspections of a property, oldest first.
    pub async fn get_inspections_for_property(
        &self,
        property_id: &str,
    ) -> Result<Vec<InspectionRecord>> {
        let property_id = property_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {INSPECTION_COLUMNS} FROM inspections
                 WHERE property_id = ?1
                 ORDER BY inspection_date ASC, created_at ASC, rowid ASC"
            ))?;
            let mut rows = stmt.query(params![property_id])?;
            let mut inspections = Vec::new();
            while let Some(row) = rows.next()? {
                inspections.push(row_to_inspection(row)?);
            }
            Ok(inspections)
        })
        .await
    }

    /// Returns false when no inspection has this id.
    pub async fn update_inspection_status(
        &self,
        inspection_id: &str,
        status: InspectionStatus,
    ) -> Result<bool> {
        let inspection_id = inspection_id.to_string();
        self.execute(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE inspections SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![status.as_str(), now_rfc3339(), inspection_id],
                )
                .context("failed to update inspection status")?;
            Ok(changed > 0)
        })
        .await
    }

    /// Returns false when no inspection has this id.
    pub async fn update_observations(
        &self,
        inspection_id: &str,
        observations: Option<String>,
    ) -> Result<bool> {
        let inspection_id = inspection_id.to_string();
        self.execute(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE inspections SET general_observations = ?1, updated_at = ?2 WHERE id = ?3",
                    params![observations, now_rfc3339(), inspection_id],
                )
                .context("failed to update inspection observations")?;
            Ok(changed > 0)
        })
        .await
    }
}
