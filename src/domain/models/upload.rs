use std::path;

use anyhow::bail;
use anyhow::Result;

/// The single file selected for the next submission. Held until the
/// submission fires or the user detaches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    pub path: path::PathBuf,
    pub file_name: String,
}

impl PendingUpload {
    pub fn new(path_str: &str) -> Result<PendingUpload> {
        let path = path::PathBuf::from(path_str);
        if !path.is_file() {
            bail!(format!("No file found at {path_str}"));
        }

        let file_name = path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return path_str.to_string());

        return Ok(PendingUpload { path, file_name });
    }
}
