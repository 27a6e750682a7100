use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    helpers::{now_rfc3339, query_optional},
    Database,
};
use crate::models::PropertyRecord;

fn row_to_property(row: &Row) -> Result<PropertyRecord> {
    Ok(PropertyRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
    })
}

impl Database {
    /// Insert the property, or refresh its name and address when it exists.
    pub async fn upsert_property(&self, property: &PropertyRecord) -> Result<()> {
        let record = property.clone();
        self.execute(move |conn| {
            let now = now_rfc3339();
            conn.execute(
                "INSERT INTO properties (id, name, address, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     address = excluded.address,
                     updated_at = excluded.updated_at",
                params![record.id, record.name, record.address, now],
            )
            .with_context(|| format!("failed to upsert property {}", record.id))?;
            Ok(())
        })
        .await
    }

    pub async fn get_property(&self, property_id: &str) -> Result<Option<PropertyRecord>> {
        let property_id = property_id.to_string();
        self.execute(move |conn| {
            query_optional(
                conn,
                "SELECT id, name, address FROM properties WHERE id = ?1",
                params![property_id],
                row_to_property,
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::tests::test_database;
    use crate::models::PropertyRecord;

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let (_dir, db) = test_database();
        let mut property = PropertyRecord {
            id: "prop-1".into(),
            name: "Apto 12".into(),
            address: None,
        };

        db.upsert_property(&property).await.unwrap();
        property.address = Some("Rua das Flores, 10".into());
        db.upsert_property(&property).await.unwrap();

        let stored = db.get_property("prop-1").await.unwrap();
        assert_eq!(stored, Some(property));
    }

    #[tokio::test]
    async fn test_missing_property_is_none() {
        let (_dir, db) = test_database();
        assert_eq!(db.get_property("nope").await.unwrap(), None);
    }
}
