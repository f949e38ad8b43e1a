use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::console::Console;
use crate::error::AppError;
use crate::records::handlers;
use crate::records::repo::RecordStore;

const MENU: &[&str] = &[
    "\n=== Health Manager ===",
    "1. Add record",
    "2. List records",
    "3. Update record",
    "4. Delete record",
    "5. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Update),
            "4" => Some(MenuChoice::Delete),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    /// Choices whose iteration ends with a commit.
    pub fn is_write(self) -> bool {
        matches!(self, MenuChoice::Add | MenuChoice::Update | MenuChoice::Delete)
    }

    fn activity(self) -> &'static str {
        match self {
            MenuChoice::Add => "adding the record",
            MenuChoice::List => "listing records",
            MenuChoice::Update => "updating the record",
            MenuChoice::Delete => "deleting the record",
            MenuChoice::Exit => "exiting",
        }
    }
}

/// User-facing text for a recovered failure.
fn describe(choice: MenuChoice, err: &AppError) -> String {
    match err {
        AppError::InvalidInput { .. } => format!("Invalid input: {err}."),
        AppError::NotFound(id) => format!("No record found with ID {id}."),
        AppError::NoChanges => "No changes were made.".to_string(),
        AppError::Storage(e) => format!("Error while {}: {e}", choice.activity()),
        AppError::Console(e) => format!("Console error: {e}"),
    }
}

/// Run the menu until the user exits or input ends.
///
/// Only console failures escape; the transaction left open by them is
/// rolled back before returning.
pub async fn run<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    match run_loop(console, store).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            if let Err(rb) = store.rollback().await {
                tracing::error!(error = %rb, "rollback failed");
            }
            Err(e.into())
        }
    }
}

async fn run_loop<R, W, S>(console: &mut Console<R, W>, store: &mut S) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordStore + ?Sized,
{
    loop {
        for line in MENU {
            console.say(line).await?;
        }
        let Some(input) = console.prompt_opt("\nChoice: ").await? else {
            tracing::info!("input closed");
            console.say("").await?;
            break;
        };

        let Some(choice) = MenuChoice::parse(&input) else {
            console.say("Please choose a valid menu option.").await?;
            continue;
        };

        let outcome = match choice {
            MenuChoice::Add => handlers::add(console, store).await,
            MenuChoice::List => handlers::list(console, store).await,
            MenuChoice::Update => handlers::update(console, store).await,
            MenuChoice::Delete => handlers::delete(console, store).await,
            MenuChoice::Exit => {
                console.say("Exiting the program.").await?;
                break;
            }
        };

        let failed_storage = match outcome {
            Ok(()) => false,
            Err(AppError::Console(e)) => return Err(AppError::Console(e)),
            Err(err) => {
                if err.is_storage() {
                    tracing::warn!(error = %err, ?choice, "storage failure");
                } else {
                    tracing::debug!(error = %err, ?choice, "command rejected");
                }
                console.say(describe(choice, &err)).await?;
                err.is_storage()
            }
        };

        if failed_storage {
            if let Err(e) = store.rollback().await {
                tracing::error!(error = %e, "rollback failed");
            }
        } else if choice.is_write() {
            if let Err(e) = store.commit().await {
                tracing::error!(error = %e, "commit failed");
                console.say(format!("Could not save changes: {e}")).await?;
                if let Err(e) = store.rollback().await {
                    tracing::error!(error = %e, "rollback failed");
                }
            }
        }
    }
    Ok(())
}
