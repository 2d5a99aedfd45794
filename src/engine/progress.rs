//! Progress bar for the collection loop (verbose mode only). Driven from the draining thread.

use kdam::{Animation, Bar, BarExt};

/// Create a bar that counts collected outcomes out of `total`.
pub fn create_progress_bar(total: usize, desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " logs"
    )
}

/// Advance the bar by `n`. Render errors only affect the display.
pub fn update_progress_bar(pb: &mut Bar, n: usize) {
    let _ = pb.update(n);
}

/// Finish the bar on its own line so the summary starts cleanly.
pub fn finish_progress_bar(pb: &mut Bar) {
    let _ = pb.refresh();
    eprintln!();
}
