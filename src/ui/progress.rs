//! Download progress bars

use indicatif::{ProgressBar, ProgressStyle};

/// Byte-count bar for a download, hidden when `visible` is false.
///
/// Falls back to a spinner when the total size is unknown.
pub fn transfer_bar(visible: bool, total: Option<u64>) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "  {spinner:.cyan} {bar:30.cyan/dim} {bytes}/{total_bytes} {bytes_per_sec:.dim} {eta:.dim}",
            ) {
                bar.set_style(style.progress_chars("━╸─"));
            }
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::default_spinner().template("  {spinner:.cyan} {bytes} {bytes_per_sec:.dim}")
            {
                bar.set_style(style);
            }
            bar
        }
    }
}
