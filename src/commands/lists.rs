//! `listwise lists` command.

use crate::cli::ListAction;
use crate::client::TodoClient;
use crate::display;
use crate::selection::ListSelection;

const NO_LISTS_HINT: &str = "No lists yet. Create one with `listwise lists add <NAME>`.\n";

/// Execute a `lists` action; `None` shows every list, marking `list` if given.
///
/// # Errors
///
/// Returns an error string if validation or the store call fails, or if the
/// selected list does not exist.
pub async fn run(
    client: &TodoClient,
    list: Option<u64>,
    action: Option<&ListAction>,
) -> Result<String, String> {
    let selection = list.map_or_else(ListSelection::default, ListSelection::of);
    match action.unwrap_or(&ListAction::Show) {
        ListAction::Show => {
            let lists = client.lists().await.map_err(|e| e.to_string())?;
            if lists.is_empty() {
                return Ok(NO_LISTS_HINT.to_string());
            }
            let marked = match selection.selected() {
                None => None,
                Some(id) => match selection.resolve(&lists) {
                    Some(found) => Some(found.id),
                    None => return Err(format!("list {id} not found")),
                },
            };
            Ok(display::list_rows(&lists, marked))
        }
        ListAction::Add { name } => {
            let list = client.create_list_named(name).await.map_err(|e| e.to_string())?;
            Ok(format!("Created list {} ({})\n", list.id, list.name))
        }
        ListAction::Rename { id, name } => {
            let list = client.rename_list(*id, name).await.map_err(|e| e.to_string())?;
            Ok(format!("Renamed list {} to {}\n", list.id, list.name))
        }
        ListAction::Rm { id } => {
            client.delete_list(*id).await.map_err(|e| e.to_string())?;
            Ok(format!("Deleted list {id}\n"))
        }
    }
}
