use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{helpers::query_optional, Database};
use crate::models::PhotoRecord;

const PHOTO_COLUMNS: &str =
    "id, inspection_id, photo_url, room, ai_analysis_result, image_hash, created_at";

fn row_to_photo(row: &Row) -> Result<PhotoRecord> {
    Ok(PhotoRecord {
        id: row.get("id")?,
        inspection_id: row.get("inspection_id")?,
        photo_url: row.get("photo_url")?,
        room: row.get("room")?,
        ai_analysis_result: row.get("ai_analysis_result")?,
        image_hash: row.get("image_hash")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    pub async fn insert_photo(&self, photo: &PhotoRecord) -> Result<()> {
        let record = photo.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO photos (id, inspection_id, photo_url, room, ai_analysis_result, image_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.inspection_id,
                    record.photo_url,
                    record.room,
                    record.ai_analysis_result,
                    record.image_hash,
                    record.created_at,
                ],
            )
            .with_context(|| format!("failed to insert photo {}", record.id))?;
            Ok(())
        })
        .await
    }

    pub async fn get_photo(&self, photo_id: &str) -> Result<Option<PhotoRecord>> {
        let photo_id = photo_id.to_string();
        self.execute(move |conn| {
            query_optional(
                conn,
                &format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = ?1"),
                params![photo_id],
                row_to_photo,
            )
        })
        .await
    }

    /// Photos of an inspection in creation order; insertion order breaks ties.
    pub async fn get_photos_for_inspection(&self, inspection_id: &str) -> Result<Vec<PhotoRecord>> {
        let inspection_id = inspection_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PHOTO_COLUMNS} FROM photos
                 WHERE inspection_id = ?1
                 ORDER BY created_at ASC, rowid ASC"
            ))?;
            let mut rows = stmt.query(params![inspection_id])?;
            let mut photos = Vec::new();
            while let Some(row) = rows.next()? {
                photos.push(row_to_photo(row)?);
            }
            Ok(photos)
        })
        .await
    }

    /// Replace the stored analysis JSON. Returns false when the photo is gone.
    pub async fn update_photo_analysis(
        &self,
        photo_id: &str,
        analysis_json: Option<String>,
    ) -> Result<bool> {
        let photo_id = photo_id.to_string();
        self.execute(move |conn| {
            let changed = conn
                .execute(
                    "UPDATE photos SET ai_analysis_result = ?1 WHERE id = ?2",
                    params![analysis_json, photo_id],
                )
                .context("failed to update photo analysis")?;
            Ok(changed > 0)
        })
        .await
    }

    /// Delete a photo and return the removed record, if there was one.
    pub async fn delete_photo(&self, photo_id: &str) -> Result<Option<PhotoRecord>> {
        let photo_id = photo_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            let existing = query_optional(
                &tx,
                &format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = ?1"),
                params![photo_id],
                row_to_photo,
            )?;
            if existing.is_some() {
                tx.execute("DELETE FROM photos WHERE id = ?1", params![photo_id])
                    .context("failed to delete photo")?;
            }
            tx.commit()?;
            Ok(existing)
        })
        .await
    }
}
