use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder, Transaction};

use crate::records::repo_types::{HealthRecord, NewRecord, RecordChanges};

/// Storage seam for `health_records`.
///
/// Writes join the transaction of the current menu iteration; the caller
/// ends it with [`RecordStore::commit`] or [`RecordStore::rollback`].
#[async_trait]
pub trait RecordStore: Send {
    /// Insert a record and return its store-assigned id.
    async fn insert(&mut self, record: &NewRecord) -> sqlx::Result<i32>;

    /// All records, newest first.
    async fn list_all(&mut self) -> sqlx::Result<Vec<HealthRecord>>;

    async fn find_by_id(&mut self, id: i32) -> sqlx::Result<Option<HealthRecord>>;

    async fn count_by_id(&mut self, id: i32) -> sqlx::Result<i64>;

    /// Apply only the fields present in `changes`; returns rows affected.
    async fn update(&mut self, id: i32, changes: &RecordChanges) -> sqlx::Result<u64>;

    async fn delete(&mut self, id: i32) -> sqlx::Result<u64>;

    async fn commit(&mut self) -> sqlx::Result<()>;

    async fn rollback(&mut self) -> sqlx::Result<()>;
}

pub struct PgRecordStore {
    db: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db, tx: None }
    }

    /// Discard any open transaction and release the connection.
    pub async fn close(mut self) {
        if let Some(tx) = self.tx.take() {
            if let Err(e) = tx.rollback().await {
                tracing::warn!(error = %e, "rollback on close failed");
            }
        }
        self.db.close().await;
    }

    async fn tx(&mut self) -> sqlx::Result<&mut Transaction<'static, Postgres>> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                tracing::debug!("begin transaction");
                self.db.begin().await?
            }
        };
        Ok(self.tx.insert(tx))
    }
}

// ---- Queries ----

async fn select_all<'e, E: PgExecutor<'e>>(db: E) -> sqlx::Result<Vec<HealthRecord>> {
    sqlx::query_as::<_, HealthRecord>(
        r#"
        SELECT id, height, weight, memo, created_at
          FROM health_records
         ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(db)
    .await
}

async fn select_one<'e, E: PgExecutor<'e>>(db: E, id: i32) -> sqlx::Result<Option<HealthRecord>> {
    sqlx::query_as::<_, HealthRecord>(
        r#"
        SELECT id, height, weight, memo, created_at
          FROM health_records
         WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

async fn count_one<'e, E: PgExecutor<'e>>(db: E, id: i32) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM health_records WHERE id = $1")
        .bind(id)
        .fetch_one(db)
        .await
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&mut self, record: &NewRecord) -> sqlx::Result<i32> {
        let tx = self.tx().await?;
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO health_records (height, weight, memo)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(record.height)
        .bind(record.weight)
        .bind(record.memo.as_deref()) // None → NULL
        .fetch_one(&mut **tx)
        .await?;
        tracing::debug!(id, "record inserted");
        Ok(id)
    }

    async fn list_all(&mut self) -> sqlx::Result<Vec<HealthRecord>> {
        match self.tx.as_mut() {
            Some(tx) => select_all(&mut **tx).await,
            None => select_all(&self.db).await,
        }
    }

    async fn find_by_id(&mut self, id: i32) -> sqlx::Result<Option<HealthRecord>> {
        match self.tx.as_mut() {
            Some(tx) => select_one(&mut **tx, id).await,
            None => select_one(&self.db, id).await,
        }
    }

    async fn count_by_id(&mut self, id: i32) -> sqlx::Result<i64> {
        match self.tx.as_mut() {
            Some(tx) => count_one(&mut **tx, id).await,
            None => count_one(&self.db, id).await,
        }
    }

    async fn update(&mut self, id: i32, changes: &RecordChanges) -> sqlx::Result<u64> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE health_records SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(height) = changes.height {
                set.push("height = ").push_bind_unseparated(height);
            }
            if let Some(weight) = changes.weight {
                set.push("weight = ").push_bind_unseparated(weight);
            }
            if let Some(memo) = &changes.memo {
                set.push("memo = ").push_bind_unseparated(memo.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let tx = self.tx().await?;
        let affected = qb.build().execute(&mut **tx).await?.rows_affected();
        tracing::debug!(id, affected, "record updated");
        Ok(affected)
    }

    async fn delete(&mut self, id: i32) -> sqlx::Result<u64> {
        let tx = self.tx().await?;
        let affected = sqlx::query("DELETE FROM health_records WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();
        tracing::debug!(id, affected, "record deleted");
        Ok(affected)
    }

    async fn commit(&mut self) -> sqlx::Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
            tracing::debug!("transaction committed");
        }
        Ok(())
    }

    async fn rollback(&mut self) -> sqlx::Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
            tracing::debug!("transaction rolled back");
        }
        Ok(())
    }
}
