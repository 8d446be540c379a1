pub mod analyse;
pub mod batch;
pub mod solve;
pub mod sweep;

use crate::utils::progress::CliProgressHandler;
use valenzdrift::engine::progress::ProgressReporter;

fn progress_reporter(enabled: bool) -> ProgressReporter<'static> {
    if enabled {
        ProgressReporter::with_callback(CliProgressHandler::new().get_callback())
    } else {
        ProgressReporter::new()
    }
}
