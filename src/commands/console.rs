//! Interactive console launcher

use crate::error::{Result, RolodexError};

/// Full-screen console for browsing and editing CRM records
///
/// NOTE: This function creates its own tokio runtime because it's an entry
/// point for the TUI. This is intentional and safe since it's not called
/// from within another async context.
pub fn cmd_console() -> Result<()> {
    use crate::tui::console::Console;
    use iocraft::prelude::*;

    // Fail early with a readable message instead of a blank screen.
    let session = crate::session::Session::require()?;
    let config = crate::config::Config::load()?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| RolodexError::Other(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(async {
        element!(Console(
            config: Some(config),
            session: Some(session),
        ))
        .fullscreen()
        .await
        .map_err(|e| RolodexError::Other(format!("console error: {}", e)))
    })
}
