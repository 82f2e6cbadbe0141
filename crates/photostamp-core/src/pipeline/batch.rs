//! Batch driver: runs the per-image pipeline over a whole directory.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::error::StampError;
use crate::types::ProcessingStats;

use super::processor::{ImageProcessor, ProcessOutcome};

/// Drives the processor over every supported file in an input directory,
/// writing results under the output directory with the same file names.
///
/// Images are processed strictly one at a time; Nominatim's usage policy
/// rules out concurrent requests.
pub struct BatchDriver<'a> {
    processor: &'a ImageProcessor,
    overwrite: bool,
}

impl<'a> BatchDriver<'a> {
    pub fn new(processor: &'a ImageProcessor, overwrite: bool) -> Self {
        Self {
            processor,
            overwrite,
        }
    }

    /// Process the directory. `progress` is invoked before each file with
    /// (index, total, path). One failed image is logged and counted, never
    /// fatal to the rest of the batch.
    pub async fn run(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mut progress: impl FnMut(usize, usize, &Path),
    ) -> Result<ProcessingStats, StampError> {
        let started = Instant::now();
        let files = self.processor.discover(input_dir)?;
        fs::create_dir_all(output_dir)?;

        let total = files.len();
        tracing::info!(
            input = %input_dir.display(),
            output = %output_dir.display(),
            total,
            "starting batch"
        );

        let mut stats = ProcessingStats::default();
        for (index, input_path) in files.iter().enumerate() {
            progress(index, total, input_path);

            // discover() only returns paths with a file name
            let Some(file_name) = input_path.file_name() else {
                continue;
            };
            let output_path = output_dir.join(file_name);

            if !self.overwrite && output_path.exists() {
                tracing::debug!(path = %output_path.display(), "output exists, skipping");
                stats.skipped_existing += 1;
                continue;
            }

            match self.processor.process_file(input_path, &output_path).await {
                Ok(ProcessOutcome::Written(path)) => {
                    tracing::info!(path = %path.display(), "wrote captioned image");
                    stats.written += 1;
                }
                Ok(ProcessOutcome::SkippedNoDate) => {
                    stats.skipped_no_date += 1;
                }
                Err(err) => {
                    tracing::error!(
                        path = %input_path.display(),
                        error = %err,
                        "failed to process image"
                    );
                    stats.failed += 1;
                }
            }
        }

        stats.total_seconds = started.elapsed().as_secs_f64();
        tracing::info!(
            written = stats.written,
            skipped_existing = stats.skipped_existing,
            skipped_no_date = stats.skipped_no_date,
            failed = stats.failed,
            seconds = format!("{:.1}", stats.total_seconds),
            "batch complete"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::PipelineError;
    use crate::geocode::{AddressComponents, ReverseGeocoder};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct CountingGeocoder {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl ReverseGeocoder for CountingGeocoder {
        fn name(&self) -> &str {
            "counting"
        }

        async fn reverse(&self, _: f64, _: f64) -> Result<AddressComponents, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AddressComponents::new())
        }
    }

    fn processor() -> (ImageProcessor, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let geocoder = CountingGeocoder {
            calls: calls.clone(),
        };
        (
            ImageProcessor::new(Config::default(), Box::new(geocoder)),
            calls,
        )
    }

    fn write_jpeg(path: &Path) {
        image::RgbImage::from_pixel(32, 32, image::Rgb([100, 100, 100]))
            .save_with_format(path, image::ImageFormat::Jpeg)
            .unwrap();
    }

    #[tokio::test]
    async fn test_existing_output_is_not_reprocessed() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_jpeg(&input.path().join("20180520_093724.jpg"));

        let existing = output.path().join("20180520_093724.jpg");
        fs::write(&existing, b"already here").unwrap();

        let (processor, calls) = processor();
        let driver = BatchDriver::new(&processor, false);
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(stats.skipped_existing, 1);
        assert_eq!(stats.written, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        // skip happened before any decode or write
        assert_eq!(fs::read(&existing).unwrap(), b"already here");
    }

    #[tokio::test]
    async fn test_dateless_image_counted_and_not_written() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_jpeg(&input.path().join("holiday.jpg"));

        let (processor, _) = processor();
        let driver = BatchDriver::new(&processor, false);
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(stats.skipped_no_date, 1);
        assert_eq!(stats.written, 0);
        assert!(!output.path().join("holiday.jpg").exists());
    }

    #[tokio::test]
    async fn test_unreadable_image_counted_as_failed() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("20180520_093724.jpg"), b"not a jpeg").unwrap();

        let (processor, _) = processor();
        let driver = BatchDriver::new(&processor, false);
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(stats.written, 0);
    }

    #[tokio::test]
    async fn test_missing_input_dir_is_fatal() {
        let output = TempDir::new().unwrap();
        let (processor, _) = processor();
        let driver = BatchDriver::new(&processor, false);
        let result = driver
            .run(Path::new("/nonexistent/input"), output.path(), |_, _, _| {})
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_progress_sees_every_file_in_order() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_jpeg(&input.path().join("b.jpg"));
        write_jpeg(&input.path().join("a.jpg"));

        let (processor, _) = processor();
        let driver = BatchDriver::new(&processor, false);
        let mut seen = Vec::new();
        driver
            .run(input.path(), output.path(), |index, total, path| {
                seen.push((index, total, path.file_name().unwrap().to_os_string()));
            })
            .await
            .unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 0);
        assert_eq!(seen[0].1, 2);
        assert_eq!(seen[0].2, "a.jpg");
        assert_eq!(seen[1].2, "b.jpg");
    }

    #[tokio::test]
    async fn test_dated_image_written_and_overwrite_honored() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_jpeg(&input.path().join("20180520_093724.jpg"));

        let (processor, _) = processor();
        if processor.ensure_font().is_err() {
            return;
        }
        let driver = BatchDriver::new(&processor, false);
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();
        assert_eq!(stats.written, 1);
        assert!(output.path().join("20180520_093724.jpg").exists());

        // Second run without --overwrite skips, with it rewrites
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();
        assert_eq!(stats.skipped_existing, 1);

        let driver = BatchDriver::new(&processor, true);
        let stats = driver
            .run(input.path(), output.path(), |_, _, _| {})
            .await
            .unwrap();
        assert_eq!(stats.written, 1);
    }
}
