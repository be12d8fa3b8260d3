use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct StageReport {
    pub entries: Vec<ExtractedEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub total_bytes: u64,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub original_path: String,
    pub target_path: PathBuf,
    pub size: u64,
}

/// An entry that was refused before anything was written for it.
#[derive(Clone, Debug)]
pub struct SkippedEntry {
    pub original_path: String,
    pub reason: &'static str,
}

impl StageReport {
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_report_defaults_empty() {
        let report = StageReport::default();
        assert_eq!(report.file_count(), 0);
        assert_eq!(report.total_bytes, 0);
        assert!(report.skipped.is_empty());
    }
}
