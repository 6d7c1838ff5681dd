//! File-structure check
//!
//! Verifies that every file the application needs exists under the project
//! directory. Each path is reported individually; a missing file fails the
//! check but never stops the scan, so the report shows the full picture.

use std::path::Path;

use crate::common::config::FilesConfig;

use super::{CheckInfo, CheckItem, CheckOutcome};

pub const ID: &str = "files";
pub const NAME: &str = "File Structure";

/// Run the file-structure check against `project_dir`
pub fn run(info: &CheckInfo, config: &FilesConfig, project_dir: &Path) -> CheckOutcome {
    let items = config
        .required
        .iter()
        .map(|rel| {
            let path = project_dir.join(rel);
            if path.exists() {
                CheckItem::pass(rel.as_str())
            } else {
                CheckItem::fail(rel.as_str(), "MISSING")
            }
        })
        .collect();

    CheckOutcome::from_items(info, items)
}
