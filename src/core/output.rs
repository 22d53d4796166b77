use crate::domain::model::{LoadOutcome, OutputTarget};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};

/// Sends rendered output to its target. A failed file write is logged and
/// reported as [`LoadOutcome::WriteFailed`] unless `strict` is set.
pub async fn deliver<S: Storage>(
    storage: &S,
    target: &OutputTarget,
    text: String,
    strict: bool,
) -> Result<LoadOutcome> {
    let path = match target {
        OutputTarget::Stdout => return Ok(LoadOutcome::Stdout(text)),
        OutputTarget::File(path) => path,
    };

    tracing::debug!("Writing {} bytes to {}", text.len(), path);
    match storage.write_file(path, &text).await {
        Ok(()) => Ok(LoadOutcome::Written(path.clone())),
        Err(source) if strict => Err(ToolError::WriteError {
            path: path.clone(),
            source,
        }),
        Err(source) => {
            tracing::error!("Failed to write {}: {}", path, source);
            Ok(LoadOutcome::WriteFailed {
                path: path.clone(),
                reason: source.to_string(),
            })
        }
    }
}
