//! Integration tests for the image compressor.
//!
//! Each test builds a small `Projects/` tree in a temp directory with images
//! generated by the `image` crate, runs the batch, and inspects the files on
//! disk.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use portfolio_thumbs::{
    compress_thumbnails, BatchProgressCallback, CompressConfig, DirMatch, ThumbsError,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A temp dir holding `Projects/` with the given thumbnail folders created.
fn project_tree(dirs: &[&str]) -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("Projects");
    for d in dirs {
        fs::create_dir_all(root.join(d)).unwrap();
    }
    (tmp, root)
}

/// A smooth gradient: compresses predictably and never trips the encoder.
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

fn write_png(path: &Path, img: DynamicImage) {
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

fn dimensions(path: &Path) -> (u32, u32) {
    let img = image::ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap();
    (img.width(), img.height())
}

fn is_jpeg(path: &Path) -> bool {
    fs::read(path).unwrap().starts_with(&[0xFF, 0xD8, 0xFF])
}

// ── Resizing ─────────────────────────────────────────────────────────────────

#[test]
fn wide_image_is_capped_at_400_with_rounded_height() {
    let (_tmp, root) = project_tree(&["Baumit/thumbnails"]);
    let src = root.join("Baumit/thumbnails/wide.png");
    write_png(&src, DynamicImage::ImageRgb8(gradient(1000, 334)));

    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();

    assert_eq!(summary.files_compressed(), 1);
    assert_eq!(summary.files_failed(), 0);
    // 334 × 400 / 1000 = 133.6 → 134
    assert_eq!(dimensions(&src), (400, 134));
    assert_eq!((summary.compressed[0].width, summary.compressed[0].height), (400, 134));
}

#[test]
fn narrow_image_is_never_upscaled() {
    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    let src = root.join("A/thumbnails/small.jpg");
    DynamicImage::ImageRgb8(gradient(300, 500))
        .save_with_format(&src, ImageFormat::Jpeg)
        .unwrap();

    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    compress_thumbnails(&config).unwrap();

    assert_eq!(dimensions(&src), (300, 500));
}

// ── Encoding ─────────────────────────────────────────────────────────────────

#[test]
fn png_keeps_its_name_but_holds_jpeg_bytes() {
    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    let src = root.join("A/thumbnails/logo.png");
    let rgba = RgbaImage::from_fn(500, 200, |x, _| Rgba([x as u8, 50, 200, (x % 256) as u8]));
    write_png(&src, DynamicImage::ImageRgba8(rgba));

    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();

    assert_eq!(summary.files_compressed(), 1);
    assert!(src.exists(), "extension must not change");
    assert!(is_jpeg(&src));
    assert_eq!(dimensions(&src), (400, 160));
}

#[test]
fn second_pass_keeps_width_and_does_not_grow_materially() {
    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    let src = root.join("A/thumbnails/photo.png");
    write_png(&src, DynamicImage::ImageRgb8(gradient(1200, 900)));

    let config = CompressConfig::builder(&root).in_place().build().unwrap();

    compress_thumbnails(&config).unwrap();
    let first = fs::metadata(&src).unwrap().len();
    let first_dims = dimensions(&src);

    let summary = compress_thumbnails(&config).unwrap();
    let second = fs::metadata(&src).unwrap().len();

    assert_eq!(summary.files_compressed(), 1, "a .png holding JPEG bytes must still decode");
    assert_eq!(dimensions(&src), first_dims);
    assert!(
        second <= first + first / 20,
        "second pass grew from {first} to {second} bytes"
    );
}

// ── Output targets ───────────────────────────────────────────────────────────

#[test]
fn default_mode_mirrors_and_leaves_originals_untouched() {
    let (tmp, root) = project_tree(&["Oxford LT/Castle View/thumbnails"]);
    let src = root.join("Oxford LT/Castle View/thumbnails/plan.png");
    write_png(&src, DynamicImage::ImageRgb8(gradient(800, 600)));
    let original = fs::read(&src).unwrap();

    let config = CompressConfig::builder(&root).build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();

    let mirrored = tmp
        .path()
        .join("Projects-compressed/Oxford LT/Castle View/thumbnails/plan.png");
    assert_eq!(summary.compressed[0].destination, mirrored);
    assert!(is_jpeg(&mirrored));
    assert_eq!(dimensions(&mirrored), (400, 300));
    assert_eq!(fs::read(&src).unwrap(), original);
}

#[test]
fn explicit_output_directory_is_used() {
    let (tmp, root) = project_tree(&["A/thumbnails"]);
    write_png(
        &root.join("A/thumbnails/x.png"),
        DynamicImage::ImageRgb8(gradient(50, 50)),
    );

    let out = tmp.path().join("out");
    let config = CompressConfig::builder(&root).mirror_to(&out).build().unwrap();
    compress_thumbnails(&config).unwrap();

    assert!(out.join("A/thumbnails/x.png").exists());
}

// ── Discovery ────────────────────────────────────────────────────────────────

#[test]
fn only_thumbnail_folders_are_touched() {
    let (_tmp, root) = project_tree(&["A/thumbnails", "A/Group GA", "A/old-thumbnails"]);
    let inside = root.join("A/thumbnails/in.png");
    let outside = root.join("A/Group GA/out.png");
    let lookalike = root.join("A/old-thumbnails/look.png");
    for p in [&inside, &outside, &lookalike] {
        write_png(p, DynamicImage::ImageRgb8(gradient(600, 300)));
    }

    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();

    assert_eq!(summary.files_compressed(), 1);
    assert_eq!(dimensions(&inside), (400, 200));
    assert_eq!(dimensions(&outside), (600, 300));
    assert_eq!(dimensions(&lookalike), (600, 300));

    let legacy = CompressConfig::builder(&root)
        .in_place()
        .dir_match(DirMatch::Substring)
        .build()
        .unwrap();
    let summary = compress_thumbnails(&legacy).unwrap();
    // in.png again plus the look-alike folder
    assert_eq!(summary.files_compressed(), 2);
    assert_eq!(dimensions(&lookalike), (400, 200));
}

#[test]
fn missing_root_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let config = CompressConfig::builder(tmp.path().join("Projects"))
        .in_place()
        .build()
        .unwrap();
    let err = compress_thumbnails(&config).unwrap_err();
    assert!(matches!(err, ThumbsError::ProjectRootNotFound { .. }));
}

// ── Failure handling ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Counter {
    complete: AtomicUsize,
    errors: AtomicUsize,
}

impl BatchProgressCallback for Counter {
    fn on_item_complete(&self, _item: usize, _total: usize, _line: &str) {
        self.complete.fetch_add(1, Ordering::SeqCst);
    }
    fn on_item_error(&self, _item: usize, _total: usize, _error: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn corrupt_and_empty_files_are_counted_unchanged() {
    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    write_png(
        &root.join("A/thumbnails/a_good.png"),
        DynamicImage::ImageRgb8(gradient(800, 400)),
    );
    fs::write(root.join("A/thumbnails/b_corrupt.jpg"), vec![0x42; 4096]).unwrap();
    fs::write(root.join("A/thumbnails/c_empty.png"), b"").unwrap();

    let counter = Arc::new(Counter::default());
    let config = CompressConfig::builder(&root)
        .in_place()
        .progress_callback(counter.clone() as Arc<dyn BatchProgressCallback>)
        .build()
        .unwrap();
    let summary = compress_thumbnails(&config).unwrap();

    assert_eq!(summary.files_compressed(), 1);
    assert_eq!(summary.files_failed(), 2);
    assert!(summary.failures.iter().all(|f| f.error.kind() == "decode"));
    assert_eq!(counter.complete.load(Ordering::SeqCst), 1);
    assert_eq!(counter.errors.load(Ordering::SeqCst), 2);

    // The corrupt file's 4096 bytes appear unchanged on both sides.
    let good = &summary.compressed[0];
    assert_eq!(summary.total_before_bytes, good.before_bytes + 4096);
    assert_eq!(summary.total_after_bytes, good.after_bytes + 4096);
    assert_eq!(fs::read(root.join("A/thumbnails/b_corrupt.jpg")).unwrap().len(), 4096);
}

#[test]
fn empty_tree_reports_zero_reduction() {
    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();
    assert_eq!(summary.files_compressed(), 0);
    assert_eq!(summary.reduction_percent(), 0.0);
}

#[cfg(unix)]
#[test]
fn unreadable_file_is_counted_at_its_size() {
    use std::os::unix::fs::PermissionsExt;

    let (_tmp, root) = project_tree(&["A/thumbnails"]);
    let src = root.join("A/thumbnails/locked.png");
    write_png(&src, DynamicImage::ImageRgb8(gradient(600, 300)));
    let size = fs::metadata(&src).unwrap().len();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::File::open(&src).is_ok() {
        // Running with privileges that ignore file modes.
        fs::set_permissions(&src, fs::Permissions::from_mode(0o644)).unwrap();
        println!("SKIP: file modes are not enforced for this user");
        return;
    }

    let config = CompressConfig::builder(&root).in_place().build().unwrap();
    let summary = compress_thumbnails(&config).unwrap();
    fs::set_permissions(&src, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(summary.files_failed(), 1);
    assert_eq!(summary.failures[0].error.kind(), "read");
    assert_eq!(summary.total_before_bytes, size);
    assert_eq!(summary.total_after_bytes, size);
}
