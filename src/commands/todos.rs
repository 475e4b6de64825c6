//! `listwise todos` command.

use crate::cli::{TaskArgs, TodoAction};
use crate::client::TodoClient;
use crate::display;
use crate::form::{Field, TaskForm};
use crate::selection::ListSelection;

/// Execute a `todos` action in `list` (the default list when `None`).
///
/// # Errors
///
/// Returns an error string if validation or a store call fails.
pub async fn run(
    client: &TodoClient,
    list: Option<u64>,
    action: Option<&TodoAction>,
) -> Result<String, String> {
    let mut selection = ListSelection::default();
    if let Some(id) = list {
        selection.select(id);
    }

    match action.unwrap_or(&TodoAction::Show) {
        TodoAction::Show => show(client, selection).await,
        TodoAction::Add(args) => {
            let mut form = TaskForm::create(selection.effective());
            apply(&mut form, args);
            let task = client.submit(&form).await.map_err(|e| e.to_string())?;
            Ok(format!("Created todo {} in list {}\n", task.id, task.list_id))
        }
        TodoAction::Edit { id, fields } => {
            let current = client.todo(*id).await.map_err(|e| e.to_string())?;
            let mut form = TaskForm::edit(&current);
            apply(&mut form, fields);
            let task = client.submit(&form).await.map_err(|e| e.to_string())?;
            Ok(format!("Updated todo {}\n", task.id))
        }
        TodoAction::Done { id } => {
            let current = client.todo(*id).await.map_err(|e| e.to_string())?;
            let task = client.toggle_completed(&current).await.map_err(|e| e.to_string())?;
            let state = if task.completed { "completed" } else { "incomplete" };
            Ok(format!("Marked todo {} {state}\n", task.id))
        }
        TodoAction::Rm { id } => {
            client.delete_todo(*id).await.map_err(|e| e.to_string())?;
            Ok(format!("Deleted todo {id}\n"))
        }
    }
}

async fn show(client: &TodoClient, selection: ListSelection) -> Result<String, String> {
    let list = client.list(selection.effective()).await.map_err(|e| e.to_string())?;
    let todos = client.todos_in_list(list.id).await.map_err(|e| e.to_string())?;

    let mut out = format!("{} ({} todos)\n", list.name, todos.len());
    for task in &todos {
        out.push('\n');
        out.push_str(&display::task_block(task));
    }
    Ok(out)
}

fn apply(form: &mut TaskForm, args: &TaskArgs) {
    let fields = [
        (Field::Title, &args.title),
        (Field::Description, &args.description),
        (Field::Priority, &args.priority),
        (Field::DueDate, &args.due),
        (Field::Tags, &args.tags),
        (Field::EstimatedTime, &args.estimate),
        (Field::ActualTimeSpent, &args.spent),
        (Field::Completed, &args.completed),
        (Field::ListId, &args.move_to),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set(field, value.as_str());
        }
    }
}
