use crate::error::AppError;
use crate::records::dto::RecordView;
use crate::records::repo::RecordStore;
use crate::records::repo_types::{normalize_memo, NewRecord, RecordChanges};

/// Parse a record id typed by the user.
pub fn parse_id(input: &str) -> Result<i32, AppError> {
    input.trim().parse::<i32>().map_err(|_| AppError::InvalidInput {
        field: "ID",
        expected: "a whole number",
        input: input.to_string(),
    })
}

/// Parse a height or weight; zero and negatives are rejected.
pub fn parse_measurement(field: &'static str, input: &str) -> Result<i32, AppError> {
    match input.trim().parse::<i32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::InvalidInput {
            field,
            expected: "a positive whole number",
            input: input.to_string(),
        }),
    }
}

pub async fn add_record<S>(
    store: &mut S,
    height: i32,
    weight: i32,
    memo: &str,
) -> Result<i32, AppError>
where
    S: RecordStore + ?Sized,
{
    let record = NewRecord {
        height,
        weight,
        memo: normalize_memo(memo),
    };
    let id = store.insert(&record).await?;
    tracing::info!(id, height, weight, "health record added");
    Ok(id)
}

/// All records newest first, each with its BMI.
pub async fn list_records<S>(store: &mut S) -> Result<Vec<RecordView>, AppError>
where
    S: RecordStore + ?Sized,
{
    let rows = store.list_all().await?;
    Ok(rows.into_iter().map(RecordView::from).collect())
}

pub async fn find_record<S>(store: &mut S, id: i32) -> Result<RecordView, AppError>
where
    S: RecordStore + ?Sized,
{
    store
        .find_by_id(id)
        .await?
        .map(RecordView::from)
        .ok_or(AppError::NotFound(id))
}

pub async fn ensure_exists<S>(store: &mut S, id: i32) -> Result<(), AppError>
where
    S: RecordStore + ?Sized,
{
    if store.count_by_id(id).await? == 0 {
        return Err(AppError::NotFound(id));
    }
    Ok(())
}

pub async fn update_record<S>(
    store: &mut S,
    id: i32,
    changes: &RecordChanges,
) -> Result<(), AppError>
where
    S: RecordStore + ?Sized,
{
    if changes.is_empty() {
        return Err(AppError::NoChanges);
    }
    if store.update(id, changes).await? == 0 {
        return Err(AppError::NotFound(id));
    }
    tracing::info!(id, "health record updated");
    Ok(())
}

pub async fn delete_record<S>(store: &mut S, id: i32) -> Result<(), AppError>
where
    S: RecordStore + ?Sized,
{
    if store.delete(id).await? == 0 {
        return Err(AppError::NotFound(id));
    }
    tracing::info!(id, "health record deleted");
    Ok(())
}
