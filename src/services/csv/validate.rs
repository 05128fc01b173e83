use crate::error::AppError;

pub const ACCEPTED_MIME_TYPES: &[&str] = &["text/csv", "application/vnd.ms-excel"];

/// Rejects uploads that are not CSV or exceed `max_size` bytes. The type is
/// checked first; a `.csv` name is enough even with an unexpected MIME type.
pub fn validate_upload(
    file_name: &str,
    mime_type: &str,
    size: usize,
    max_size: usize,
) -> Result<(), AppError> {
    let mime_ok = ACCEPTED_MIME_TYPES.contains(&mime_type);
    if !mime_ok && !file_name.ends_with(".csv") {
        tracing::warn!("Rejected upload {:?}: unsupported type {:?}", file_name, mime_type);
        return Err(AppError::InvalidFileType(mime_type.to_string()));
    }

    if size > max_size {
        tracing::warn!("Rejected upload {:?}: {} bytes exceeds {}", file_name, size, max_size);
        return Err(AppError::FileTooLarge { limit: max_size });
    }

    Ok(())
}
