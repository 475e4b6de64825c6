//! Command dispatch and handlers.

pub mod lists;
pub mod todos;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::client::TodoClient;
use crate::config::Config;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `LISTWISE_RECORD` is set to a directory path, all store traffic is
/// recorded to a cassette in that directory. When `LISTWISE_REPLAY` names a
/// cassette, traffic is served from it instead of the network.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the command fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;
    let (ctx, session) = ServiceContext::from_config(&config)?;

    // The client owns the transport; it is gone once this returns.
    let result = execute(command, ctx);

    // Finish recording after command completes (even on error)
    let finished = session.map(finish_recording);
    settle(result, finished)
}

/// The command's own error comes first; a failed save is still reported.
fn settle(result: Result<(), String>, finished: Option<Result<(), String>>) -> Result<(), String> {
    match (result, finished) {
        (Err(command), Some(Err(save))) => Err(format!("{command} (recording not saved: {save})")),
        (Err(command), _) => Err(command),
        (Ok(()), Some(Err(save))) => Err(save),
        (Ok(()), _) => Ok(()),
    }
}

fn execute(command: &Command, ctx: ServiceContext) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let client = ctx.client();
    let output = runtime.block_on(run_command(&client, command))?;
    print!("{output}");
    Ok(())
}

/// Runs a command against `client` and returns what it would print.
///
/// # Errors
///
/// Returns an error string if the command fails.
pub async fn run_command(client: &TodoClient, command: &Command) -> Result<String, String> {
    match command {
        Command::Lists { list, action } => lists::run(client, *list, action.as_ref()).await,
        Command::Todos { list, action } => todos::run(client, *list, action.as_ref()).await,
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
