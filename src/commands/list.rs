//! List command - print the candidate paths of a directory

use crate::config::ListingConfig;
use crate::output::OutputWriter;
use crate::search::list_candidates;
use crate::TagpickError;
use std::path::Path;

type Result<T> = std::result::Result<T, TagpickError>;

/// Execute the list command
///
/// # Errors
///
/// Returns `TagpickError::Search` if the directory cannot be listed.
pub async fn execute(
    base_dir: &Path,
    config: &ListingConfig,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    let mut paths = list_candidates(base_dir, config).await?;
    paths.sort_by(|a, b| crate::tags::compare_paths(a, b));

    if paths.is_empty() {
        if !quiet {
            output.info("No files found.");
        }
        return Ok(());
    }

    for path in &paths {
        output.write(path);
    }
    if !quiet {
        output.info(&format!("{} file(s)", paths.len()));
    }
    Ok(())
}
