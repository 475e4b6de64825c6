//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `listwise`.
#[derive(Debug, Parser)]
#[command(name = "listwise", version, about = "Manage task lists on a hosted store")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change lists.
    Lists {
        /// List to mark as selected in `show`.
        #[arg(long, short)]
        list: Option<u64>,
        /// Defaults to `show`.
        #[command(subcommand)]
        action: Option<ListAction>,
    },
    /// Show or change the todos of one list.
    Todos {
        /// List to work in; list 1 when omitted.
        #[arg(long, short)]
        list: Option<u64>,
        /// Defaults to `show`.
        #[command(subcommand)]
        action: Option<TodoAction>,
    },
}

/// List subcommands.
#[derive(Debug, Subcommand)]
pub enum ListAction {
    /// Print every list.
    Show,
    /// Create a list.
    Add {
        /// Display name.
        name: String,
    },
    /// Rename a list.
    Rename {
        /// List id.
        id: u64,
        /// New display name.
        name: String,
    },
    /// Delete a list.
    Rm {
        /// List id.
        id: u64,
    },
}

/// Todo subcommands.
#[derive(Debug, Subcommand)]
pub enum TodoAction {
    /// Print the todos of the list.
    Show,
    /// Create a todo in the list.
    Add(TaskArgs),
    /// Change fields of an existing todo.
    Edit {
        /// Todo id.
        id: u64,
        /// Fields to overwrite.
        #[command(flatten)]
        fields: TaskArgs,
    },
    /// Flip a todo's completion flag.
    Done {
        /// Todo id.
        id: u64,
    },
    /// Delete a todo.
    Rm {
        /// Todo id.
        id: u64,
    },
}

/// Raw task fields as typed on the command line. Validation happens later.
#[derive(Debug, Default, Args)]
pub struct TaskArgs {
    /// Title.
    #[arg(long)]
    pub title: Option<String>,
    /// Description.
    #[arg(long)]
    pub description: Option<String>,
    /// `low`, `medium` or `high`.
    #[arg(long)]
    pub priority: Option<String>,
    /// `YYYY-MM-DD`; empty clears it.
    #[arg(long)]
    pub due: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    /// Estimated hours.
    #[arg(long)]
    pub estimate: Option<String>,
    /// Hours spent.
    #[arg(long)]
    pub spent: Option<String>,
    /// `true` or `false`.
    #[arg(long)]
    pub completed: Option<String>,
    /// Move to another list.
    #[arg(long = "move-to")]
    pub move_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_defaults_to_show() {
        let cli = Cli::parse_from(["listwise", "lists"]);
        assert!(matches!(cli.command, Command::Lists { list: None, action: None }));
    }

    #[test]
    fn parses_todo_add_with_raw_fields() {
        let cli = Cli::parse_from([
            "listwise", "todos", "--list", "4", "add", "--title", "Buy milk", "--estimate", "abc",
        ]);
        let Command::Todos { list, action: Some(TodoAction::Add(args)) } = cli.command else {
            panic!("expected todos add");
        };
        assert_eq!(list, Some(4));
        assert_eq!(args.title.as_deref(), Some("Buy milk"));
        assert_eq!(args.estimate.as_deref(), Some("abc"));
    }

    #[test]
    fn parses_list_rename() {
        let cli = Cli::parse_from(["listwise", "lists", "rename", "2", "Work"]);
        assert!(matches!(
            cli.command,
            Command::Lists { action: Some(ListAction::Rename { id: 2, ref name }), .. }
                if name == "Work"
        ));
    }

    #[test]
    fn lists_accepts_a_selected_list() {
        let cli = Cli::parse_from(["listwise", "lists", "--list", "2", "show"]);
        assert!(matches!(
            cli.command,
            Command::Lists { list: Some(2), action: Some(ListAction::Show) }
        ));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["listwise", "todos", "done", "seven"]).is_err());
    }
}
