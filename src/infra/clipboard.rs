use anyhow::{Context, Result};

pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text)
        .context("Failed to copy URL list to the clipboard")?;
    Ok(())
}
