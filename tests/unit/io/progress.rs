//! Tests for progress tracking and multi-file batch processing

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;
    use stipple::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use stipple::io::progress::ProgressManager;

    // Tests the lifecycle of a single tracked image
    // Verified by panicking on updates before initialization
    #[test]
    fn test_single_file_lifecycle() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);

        pm.start_file(0, Path::new("portrait.png"), 40);
        pm.update_iteration(0, 1, 2.5);
        pm.update_iteration(0, 40, 0.01);
        pm.complete_file(0, Duration::from_millis(1500));
        pm.finish();
    }

    // Tests that updates for untracked indices are ignored
    // Verified by indexing file states directly
    #[test]
    fn test_updates_for_unknown_index_ignored() {
        let mut pm = ProgressManager::default();
        pm.initialize(2);

        pm.update_iteration(7, 3, 1.0);
        pm.complete_file(9, Duration::from_millis(10));
        pm.finish();
    }

    // Tests batch mode with more images than individual bars
    // Verified by creating one bar per image
    #[test]
    fn test_batch_mode_rolls_window() {
        let mut pm = ProgressManager::new();
        let file_count = MAX_INDIVIDUAL_PROGRESS_BARS + 3;
        pm.initialize(file_count);

        for index in 0..file_count {
            let name = format!("image_{index}.png");
            pm.start_file(index, Path::new(&name), 5);
            for iteration in 1..=5 {
                pm.update_iteration(index, iteration, 1.0 / iteration as f64);
            }
            pm.complete_file(index, Duration::from_millis(20));
        }

        pm.finish();
    }

    // Tests that an empty batch is harmless
    // Verified by creating a batch bar for zero files
    #[test]
    fn test_empty_batch() {
        let mut pm = ProgressManager::new();
        pm.initialize(0);
        pm.finish();
    }
}
