use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::instrument;

use crate::console::Console;
use crate::error::AppError;
use crate::records::repo::RecordStore;
use crate::records::repo_types::RecordChanges;
use crate::records::services::{
    add_record, delete_record, ensure_exists, find_record, list_records, parse_id,
    parse_measurement, update_record,
};

// Failures are returned to the menu loop, which prints them and decides
// between commit and rollback.

#[instrument(skip_all)]
pub async fn add<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    let height = console.prompt("Height (cm): ").await?;
    let weight = console.prompt("Weight (kg): ").await?;
    let memo = console.prompt("Memo (optional): ").await?;

    let height = parse_measurement("height", &height)?;
    let weight = parse_measurement("weight", &weight)?;
    add_record(store, height, weight, &memo).await?;

    console.say("Health record added.").await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn list<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    let views = list_records(store).await?;
    if views.is_empty() {
        console.say("\nNo health records found.").await?;
        return Ok(());
    }

    console.say("\n=== Health records ===").await?;
    for view in &views {
        console.say(view.to_string()).await?;
    }
    Ok(())
}

#[instrument(skip_all)]
pub async fn update<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    let id = parse_id(&console.prompt("ID of the record to update: ").await?)?;
    let current = find_record(store, id).await?;
    console.say(current.current_values()).await?;

    let new_height = console.prompt("New height (cm) (Enter to keep): ").await?;
    let new_weight = console.prompt("New weight (kg) (Enter to keep): ").await?;
    let new_memo = console.prompt("New memo (Enter to keep): ").await?;

    let mut changes = RecordChanges::default();
    if !new_height.trim().is_empty() {
        changes.height = Some(parse_measurement("height", &new_height)?);
    }
    if !new_weight.trim().is_empty() {
        changes.weight = Some(parse_measurement("weight", &new_weight)?);
    }
    if !new_memo.trim().is_empty() {
        changes.memo = Some(new_memo);
    }

    update_record(store, id, &changes).await?;
    console.say("Health record updated.").await?;
    Ok(())
}

#[instrument(skip_all)]
pub async fn delete<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    let id = parse_id(&console.prompt("ID of the record to delete: ").await?)?;
    ensure_exists(store, id).await?;

    let confirm = console.prompt("Really delete this record? (y/N): ").await?;
    if !confirm.trim().eq_ignore_ascii_case("y") {
        console.say("Deletion cancelled.").await?;
        return Ok(());
    }

    delete_record(store, id).await?;
    console.say("Health record deleted.").await?;
    Ok(())
}
