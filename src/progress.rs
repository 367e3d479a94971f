use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use crate::util::is_stdout_tty;
use crate::ui_style::{Colors, Symbols};

/// Creates a progress bar for validating `total` files.
///
/// If stdout is not a TTY, the bar is hidden and progress goes to the log instead.
pub fn start_file_progress(total: u64, message: &str) -> ProgressBar {
    let pb = if is_stdout_tty() {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    } else {
        let pb = ProgressBar::hidden();
        pb.set_length(total);
        tracing::info!("{} ({} files)", message, total);
        pb
    };

    pb.set_message(message.to_string());
    pb
}

/// Finishes a progress bar with a success message.
pub fn finish_progress_success(pb: &ProgressBar, message: &str) {
    if is_stdout_tty() {
        pb.finish_with_message(format!("{} {}", Colors::success(Symbols::success()), message));
    } else {
        tracing::info!("{}", message);
    }
}

/// Finishes a progress bar after files with errors were found.
pub fn finish_progress_fail(pb: &ProgressBar, message: &str) {
    if is_stdout_tty() {
        pb.finish_with_message(format!("{} {}", Colors::error("✗"), message));
    } else {
        tracing::warn!("{}", message);
    }
}
