use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;

static SENDER: OnceCell<mpsc::UnboundedSender<String>> = OnceCell::new();

/// Owns the system clipboard on a background task so copies requested by the
/// workflow driver never block it.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        if SENDER.set(tx).is_err() {
            bail!("Clipboard service is already running.");
        }

        let mut clipboard = arboard::Clipboard::new()?;
        while let Some(text) = rx.recv().await {
            tracing::debug!(chars = text.chars().count(), "copying to clipboard");
            if let Err(err) = clipboard.set_text(text) {
                tracing::error!(err = ?err, "clipboard write failed");
            }
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub fn set(text: &str) -> Result<()> {
        if let Some(tx) = SENDER.get() {
            tx.send(text.to_string())?;
            return Ok(());
        }

        return Err(anyhow!(
            "The clipboard is not available on this system. Save the listing with /export instead."
        ));
    }
}
