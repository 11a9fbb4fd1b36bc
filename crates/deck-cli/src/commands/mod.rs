use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub mod check;
pub mod format;
pub mod render;
pub mod show;

/// Writes command output to `path`, or to standard output when no path is given.
fn emit(text: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("Wrote {} byte(s) to {:?}", text.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
