#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use filetime::FileTime;
    use image::{GenericImageView, Rgb, RgbImage};
    use image_optimizer::{
        calculate_aspect_ratio, BatchProcessor, CancelToken, ImageProcessor, OptimizerError,
        ResizeAlgorithm, RunConfig, SaveLocation,
    };
    use std::fs;
    use std::path::Path;

    fn write_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 251) as u8, (y % 241) as u8, ((x * y) % 239) as u8])
        });
        img.save(path).unwrap();
    }

    fn config(root: &Path) -> RunConfig {
        RunConfig {
            directory: root.to_path_buf(),
            threads: 1,
            algorithm: ResizeAlgorithm::Nearest,
            ..Default::default()
        }
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        image::open(path).unwrap().dimensions()
    }

    #[test]
    fn test_resized_folder_with_webp_copy() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("photo.jpg");
        write_image(input.path(), 3000, 2000);
        let original_size = fs::metadata(input.path()).unwrap().len();

        let batch = BatchProcessor::new(config(temp_dir.path())).unwrap();
        let summary = batch.run().unwrap();

        let jpeg = temp_dir.child("resized/photo_resized.jpg");
        let webp = temp_dir.child("resized/photo_resized.webp");
        assert!(jpeg.path().exists());
        assert!(webp.path().exists());
        assert!(input.path().exists());

        let (width, height) = dimensions(jpeg.path());
        assert_eq!(width, 1920);
        assert!((calculate_aspect_ratio(width, height) - 1.5).abs() < 0.01);
        assert_eq!(dimensions(webp.path()), (width, height));

        let new_size = fs::metadata(jpeg.path()).unwrap().len();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.saved, original_size as i64 - new_size as i64);
        assert!(!summary.cancelled);
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("small.jpg");
        write_image(input.path(), 120, 80);

        let mut cfg = config(temp_dir.path());
        cfg.convert_to_webp = false;
        let result = ImageProcessor::new(cfg).unwrap().process(input.path()).unwrap();

        assert!(!result.resized);
        assert_eq!(result.new_dimensions, (120, 80));
        assert_eq!(dimensions(&result.destination), (120, 80));
        assert!(result.webp.is_none());
        assert!(!temp_dir.child("resized/small_resized.webp").path().exists());
    }

    #[test]
    fn test_tall_image_bound_by_height() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("tall.jpg");
        write_image(input.path(), 400, 1000);

        let mut cfg = config(temp_dir.path());
        cfg.max_width = 300;
        cfg.max_height = 500;
        cfg.save_location = SaveLocation::Same;
        cfg.convert_to_webp = false;
        let result = ImageProcessor::new(cfg).unwrap().process(input.path()).unwrap();

        assert!(result.resized);
        assert_eq!(result.destination, temp_dir.path().join("tall_resized.jpg"));
        assert_eq!(dimensions(&result.destination), (200, 500));
    }

    #[test]
    fn test_overwrite_in_place_replaces_original() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("Big Photo.jpg");
        write_image(input.path(), 2400, 1200);

        let old = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_times(input.path(), old, old).unwrap();

        let mut cfg = config(temp_dir.path());
        cfg.save_location = SaveLocation::Same;
        cfg.overwrite_original = true;
        cfg.convert_to_webp = false;

        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();
        assert_eq!(summary.processed, 1);

        assert!(input.path().exists());
        assert_eq!(dimensions(input.path()), (1920, 960));
        assert!(!temp_dir.child("Big-Photo_resized.jpg").path().exists());

        let meta = fs::metadata(input.path()).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_overwrite_from_resized_folder_moves_output_back() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("shot.jpg");
        write_image(input.path(), 2000, 500);

        let mut cfg = config(temp_dir.path());
        cfg.overwrite_original = true;

        let result = ImageProcessor::new(cfg).unwrap().process(input.path()).unwrap();

        assert!(result.replaced_original);
        assert_eq!(result.destination, input.path());
        assert_eq!(dimensions(input.path()).0, 1920);
        assert!(!temp_dir.child("resized/shot_resized.jpg").path().exists());
        assert!(temp_dir.child("resized/shot_resized.webp").path().exists());
    }

    #[test]
    fn test_excluded_directory_is_never_processed() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("drafts").create_dir_all().unwrap();
        temp_dir.child("albums").create_dir_all().unwrap();
        write_image(temp_dir.child("drafts/a.jpg").path(), 64, 64);
        write_image(temp_dir.child("albums/b.jpg").path(), 64, 64);

        let mut cfg = config(temp_dir.path());
        cfg.recursive = true;
        cfg.convert_to_webp = false;
        cfg.exclude_dirs.insert("drafts".to_string());

        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(summary.processed, 1);
        assert!(temp_dir.child("albums/resized/b_resized.jpg").path().exists());
        assert!(!temp_dir.child("drafts/resized").path().exists());
    }

    #[test]
    fn test_non_recursive_run_stays_at_top_level() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("nested").create_dir_all().unwrap();
        write_image(temp_dir.child("top.jpg").path(), 32, 32);
        write_image(temp_dir.child("nested/inner.jpg").path(), 32, 32);

        let mut cfg = config(temp_dir.path());
        cfg.convert_to_webp = false;
        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(summary.processed, 1);
        assert!(!temp_dir.child("nested/resized").path().exists());
    }

    #[test]
    fn test_uppercase_extension_is_selected() {
        let temp_dir = TempDir::new().unwrap();
        write_image(temp_dir.child("PHOTO.JPG").path(), 50, 40);
        temp_dir.child("readme.txt").write_str("not an image").unwrap();

        let mut cfg = config(temp_dir.path());
        cfg.convert_to_webp = false;
        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(summary.processed, 1);
        assert!(temp_dir.child("resized/PHOTO_resized.jpg").path().exists());
    }

    #[test]
    fn test_png_keeps_its_format() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("icon.png");
        write_image(input.path(), 48, 48);

        let mut cfg = config(temp_dir.path());
        cfg.extensions.insert(".png".to_string());
        cfg.convert_to_webp = false;
        let result = ImageProcessor::new(cfg).unwrap().process(input.path()).unwrap();

        let bytes = fs::read(&result.destination).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
        assert!(result.destination.ends_with("resized/icon_resized.png"));
    }

    #[test]
    fn test_broken_file_does_not_stop_the_run() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("a-broken.jpg").write_binary(b"definitely not a jpeg").unwrap();
        write_image(temp_dir.child("b-good.jpg").path(), 20, 20);

        let mut cfg = config(temp_dir.path());
        cfg.convert_to_webp = false;
        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!temp_dir.child("resized/a-broken_resized.jpg").path().exists());
    }

    #[test]
    fn test_missing_directory_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = BatchProcessor::new(config(&missing)).unwrap().run();

        assert!(matches!(result, Err(OptimizerError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_cancelled_run_processes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        write_image(temp_dir.child("a.jpg").path(), 20, 20);

        let cancel = CancelToken::new();
        cancel.cancel();
        let summary = BatchProcessor::new(config(temp_dir.path()))
            .unwrap()
            .with_cancel_token(cancel)
            .run()
            .unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.processed, 0);
        assert!(!temp_dir.child("resized").path().exists());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut cfg = RunConfig::default();
        cfg.quality = 0;

        assert!(matches!(
            BatchProcessor::new(cfg),
            Err(OptimizerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_file() {
        let processor = ImageProcessor::new(RunConfig::default()).unwrap();

        let result = processor.process(Path::new("nonexistent.jpg"));

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_bound_is_rejected_by_processor() {
        let mut cfg = RunConfig::default();
        cfg.max_width = 0;

        assert!(matches!(
            ImageProcessor::new(cfg),
            Err(OptimizerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_parallel_run_totals_match_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let mut original_total = 0i64;
        for i in 0..16 {
            let input = temp_dir.child(format!("img{:02}.jpg", i));
            write_image(input.path(), 400 + i * 10, 300);
            original_total += fs::metadata(input.path()).unwrap().len() as i64;
        }

        let mut cfg = config(temp_dir.path());
        cfg.threads = 4;
        cfg.max_width = 200;
        cfg.convert_to_webp = false;
        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        let mut new_total = 0i64;
        for i in 0..16 {
            let output = temp_dir.child(format!("resized/img{:02}_resized.jpg", i));
            assert_eq!(dimensions(output.path()).0, 200);
            new_total += fs::metadata(output.path()).unwrap().len() as i64;
        }

        assert_eq!(summary.processed, 16);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.saved, original_total - new_total);
    }

    #[test]
    fn test_colliding_names_keep_every_original() {
        let temp_dir = TempDir::new().unwrap();
        let mut sources = Vec::new();
        let mut original_total = 0i64;
        for i in 0..12 {
            for name in [format!("p{} x.jpg", i), format!("p{}-x.jpg", i)] {
                let input = temp_dir.child(name);
                write_image(input.path(), 600, 400);
                original_total += fs::metadata(input.path()).unwrap().len() as i64;
                sources.push(input.path().to_path_buf());
            }
        }

        let mut cfg = config(temp_dir.path());
        cfg.threads = 4;
        cfg.max_width = 300;
        cfg.overwrite_original = true;
        cfg.convert_to_webp = false;
        let summary = BatchProcessor::new(cfg).unwrap().run().unwrap();

        assert_eq!(summary.processed, 24);
        assert_eq!(summary.failed, 0);

        let mut new_total = 0i64;
        for source in &sources {
            assert!(source.exists(), "lost {}", source.display());
            assert_eq!(dimensions(source), (300, 200));
            new_total += fs::metadata(source).unwrap().len() as i64;
        }
        assert_eq!(summary.saved, original_total - new_total);

        let leftovers = fs::read_dir(temp_dir.child("resized").path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }
}
