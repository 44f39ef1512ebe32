//! Operator-facing text printed by the `mbw-plot` binary.

use std::path::Path;

use mbw_core::errors::VizError;
use mbw_core::RUN_BENCHMARKS_HINT;

const BANNER_WIDTH: usize = 70;

pub fn start_banner() -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\nCUDA Memory Benchmark Visualization\n{rule}\n")
}

pub fn completion_banner(out_dir: &Path) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!(
        "\n{rule}\nAll plots saved to '{}/' directory\n{rule}\n",
        out_dir.display()
    )
}

/// Lines describing a failed run. Missing inputs name the file and say how to
/// produce it; everything else prints the error itself.
pub fn diagnostic_lines(err: &VizError) -> Vec<String> {
    match err {
        VizError::MissingInput(info) => vec![
            format!(
                "Error: Could not find results file: {}",
                err.path().unwrap_or(info.message.as_str())
            ),
            info.hint
                .clone()
                .unwrap_or_else(|| RUN_BENCHMARKS_HINT.to_string()),
        ],
        other => vec![format!("Error: {other}")],
    }
}
