use sqlx::FromRow;
use time::PrimitiveDateTime;

/// A row of `health_records`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HealthRecord {
    pub id: i32,
    pub height: i32, // cm
    pub weight: i32, // kg
    pub memo: Option<String>,
    pub created_at: PrimitiveDateTime,
}

/// Values for an insert; id and created_at come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub height: i32,
    pub weight: i32,
    pub memo: Option<String>,
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub memo: Option<String>,
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.weight.is_none() && self.memo.is_none()
    }
}

/// Empty or whitespace-only memo text is stored as NULL.
pub fn normalize_memo(memo: &str) -> Option<String> {
    if memo.trim().is_empty() {
        None
    } else {
        Some(memo.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changes_are_detected() {
        assert!(RecordChanges::default().is_empty());
        let changes = RecordChanges {
            weight: Some(65),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn blank_memo_becomes_none() {
        assert_eq!(normalize_memo(""), None);
        assert_eq!(normalize_memo("   "), None);
        assert_eq!(normalize_memo("after run"), Some("after run".to_string()));
    }
}
