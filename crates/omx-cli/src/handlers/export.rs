//! Export command handler.

use std::path::{Path, PathBuf};

use omx_core::{
    ExportDocument, ExportFormat, ExplorerSession, Notification, NotificationSink, SortMode,
};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::clipboard::CommandClipboard;
use crate::commands::{FetchArgs, FilterArgs};
use crate::error::CliError;
use crate::handlers::fetch_session;
use crate::notifier::ConsoleNotifier;

pub async fn execute(
    ctx: &CliContext,
    fetch: &FetchArgs,
    filters: &FilterArgs,
    sort: SortMode,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let notifier = ConsoleNotifier::new().quiet(true);
    let (mut session, _status) = fetch_session(ctx, fetch, &notifier).await?;
    session.set_selection(filters.to_selection());
    session.set_sort(sort);

    let notifier = ConsoleNotifier::new();
    deliver(&session, format, output, &notifier).await
}

/// Encode the session's view and hand it to the clipboard or a file.
pub(crate) async fn deliver(
    session: &ExplorerSession,
    format: ExportFormat,
    output: Option<&Path>,
    sink: &dyn NotificationSink,
) -> Result<(), CliError> {
    if format == ExportFormat::Clipboard && output.is_none() {
        session.copy_to_clipboard(&CommandClipboard::new(), sink)?;
        return Ok(());
    }

    let document = session.export(format, sink)?;
    match write_document(&document, output).await {
        Ok(path) => {
            info!(path = %path.display(), models = session.summary().shown, "Export written");
            sink.notify(Notification::ExportSucceeded {
                target: path.display().to_string(),
            });
            Ok(())
        }
        Err(e) => {
            sink.notify(Notification::ExportFailed {
                reason: e.to_string(),
            });
            Err(e)
        }
    }
}

/// Write `document` to `output`, or to its suggested file name.
pub(crate) async fn write_document(
    document: &ExportDocument,
    output: Option<&Path>,
) -> Result<PathBuf, CliError> {
    let path = match (output, &document.file_name) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(name)) => PathBuf::from(name),
        (None, None) => {
            return Err(CliError::Arguments(format!(
                "{} exports need --output",
                document.format
            )));
        }
    };
    tokio::fs::write(&path, &document.content).await?;
    Ok(path)
}
