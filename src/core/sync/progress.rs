use serde::Serialize;

const COMPLETE_LABEL: &str = "Complete";

/// Progress of a modpack install: one event before each file, then a
/// terminal event at 100%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadProgress {
    pub file_name: String,
    pub downloaded: usize,
    pub total: usize,
    pub percentage: u8,
}

impl DownloadProgress {
    /// Emitted right before file number `index` (zero-based) is fetched.
    pub fn before_file(file_name: &str, index: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((index as f64 / total as f64) * 100.0).round() as u8
        };

        Self {
            file_name: file_name.to_string(),
            downloaded: index,
            total,
            percentage,
        }
    }

    pub fn complete(total: usize) -> Self {
        Self {
            file_name: COMPLETE_LABEL.into(),
            downloaded: total,
            total,
            percentage: 100,
        }
    }
}
