use anyhow::Result;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

use crate::report::AssessmentReport;

use super::UiState;

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Export the displayed report as JSON into the current directory and update
/// the status line with the result.
pub(crate) fn export_and_show_path(report: &AssessmentReport, state: &mut UiState) {
    match crate::export::export_to_current_dir(report) {
        Ok(path) => {
            let path_str = path.to_string_lossy().to_string();
            state.last_exported_path = Some(path_str);
            state.info = format!("Exported JSON: {} (press 'y' to copy path)", path.display());
        }
        Err(e) => {
            state.info = format!("JSON export failed: {e:#}");
        }
    }
}

/// Initialize the clipboard manager thread if not already initialized.
/// A dedicated thread processes clipboard operations sequentially and keeps
/// each clipboard instance alive long enough for clipboard managers to read
/// the contents on Linux.
fn init_clipboard_manager() -> Result<&'static std_mpsc::Sender<String>> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();

        std::thread::spawn(move || {
            use arboard::Clipboard;

            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });

        tx
    });

    CLIPBOARD_SENDER
        .get()
        .ok_or_else(|| anyhow::anyhow!("Failed to initialize clipboard manager"))
}

/// Copy text to clipboard. Returns immediately after queuing the operation.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = init_clipboard_manager()?;
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
    Ok(())
}
