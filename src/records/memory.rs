use async_trait::async_trait;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::records::repo::RecordStore;
use crate::records::repo_types::{HealthRecord, NewRecord, RecordChanges};

/// In-memory `RecordStore` with the same transaction semantics as the
/// Postgres store: writes stage into a working copy until commit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: Vec<HealthRecord>,
    working: Option<Vec<HealthRecord>>,
    next_id: i32,
    pub fail_writes: bool,
    pub fail_commit: bool,
    pub commits: usize,
    pub rollbacks: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed rows, newest first.
    pub fn committed(&self) -> Vec<HealthRecord> {
        sorted(self.committed.clone())
    }

    fn visible(&self) -> &[HealthRecord] {
        self.working.as_deref().unwrap_or(&self.committed)
    }

    fn stage(&mut self) -> sqlx::Result<&mut Vec<HealthRecord>> {
        if self.fail_writes {
            return Err(sqlx::Error::Protocol("simulated write failure".into()));
        }
        let rows = match self.working.take() {
            Some(rows) => rows,
            None => self.committed.clone(),
        };
        Ok(self.working.insert(rows))
    }
}

fn sorted(mut rows: Vec<HealthRecord>) -> Vec<HealthRecord> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows
}

fn apply(changes: &RecordChanges, row: &mut HealthRecord) {
    if let Some(height) = changes.height {
        row.height = height;
    }
    if let Some(weight) = changes.weight {
        row.weight = weight;
    }
    if let Some(memo) = &changes.memo {
        row.memo = Some(memo.clone());
    }
}

fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&mut self, record: &NewRecord) -> sqlx::Result<i32> {
        let id = self.next_id + 1;
        let rows = self.stage()?;
        rows.push(HealthRecord {
            id,
            height: record.height,
            weight: record.weight,
            memo: record.memo.clone(),
            created_at: now(),
        });
        // sequences are not transactional; ids are never handed out twice
        self.next_id = id;
        Ok(id)
    }

    async fn list_all(&mut self) -> sqlx::Result<Vec<HealthRecord>> {
        Ok(sorted(self.visible().to_vec()))
    }

    async fn find_by_id(&mut self, id: i32) -> sqlx::Result<Option<HealthRecord>> {
        Ok(self.visible().iter().find(|r| r.id == id).cloned())
    }

    async fn count_by_id(&mut self, id: i32) -> sqlx::Result<i64> {
        Ok(self.visible().iter().filter(|r| r.id == id).count() as i64)
    }

    async fn update(&mut self, id: i32, changes: &RecordChanges) -> sqlx::Result<u64> {
        if changes.is_empty() {
            return Ok(0);
        }
        let rows = self.stage()?;
        let mut affected = 0;
        for row in rows.iter_mut().filter(|r| r.id == id) {
            apply(changes, row);
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&mut self, id: i32) -> sqlx::Result<u64> {
        let rows = self.stage()?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn commit(&mut self) -> sqlx::Result<()> {
        if self.fail_commit {
            return Err(sqlx::Error::Protocol("simulated commit failure".into()));
        }
        if let Some(rows) = self.working.take() {
            self.committed = rows;
        }
        self.commits += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> sqlx::Result<()> {
        self.working = None;
        self.rollbacks += 1;
        Ok(())
    }
}
