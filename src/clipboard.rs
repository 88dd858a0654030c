use cli_clipboard::{ClipboardContext, ClipboardProvider};

use crate::error::{LinguaError, Result};

/// Destination of the "copy output" action
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard: Send + Sync {
    fn set_contents(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard of the current session
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_contents(&self, text: &str) -> Result<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_string()))
            .map_err(|e| LinguaError::Clipboard(e.to_string()))
    }
}
