//! End-to-end pipeline tests: synthetic photos with synthetic EXIF blocks
//! go in one side, decodable watermarked JPEGs come out the other.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Tag, Value};
use image::ImageEncoder;
use tempfile::TempDir;

use photomark::config::MarkConfig;
use photomark::normalize::embed_exif_app1;
use photomark::pipeline::{MarkOptions, run_inspect, run_mark};

// =========================================================================
// Fixtures
// =========================================================================

fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 96])
    });
    let mut buf = Cursor::new(Vec::new());
    image::codecs::jpeg::JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf.into_inner()
}

fn exif_block(fields: &[exif::Field]) -> Vec<u8> {
    use exif::experimental::Writer;
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, false).unwrap();
    buf.into_inner()
}

fn ascii(tag: Tag, s: &str) -> exif::Field {
    exif::Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![s.as_bytes().to_vec()]),
    }
}

fn rational(tag: Tag, num: u32, denom: u32) -> exif::Field {
    exif::Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![exif::Rational { num, denom }]),
    }
}

fn short(tag: Tag, n: u16) -> exif::Field {
    exif::Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![n]),
    }
}

fn iphone_fields() -> Vec<exif::Field> {
    vec![
        ascii(Tag::Make, "Apple"),
        ascii(Tag::Model, "iPhone 15 Pro"),
        rational(Tag::FocalLength, 24, 1),
        rational(Tag::FNumber, 178, 100),
        rational(Tag::ExposureTime, 4, 1000),
        short(Tag::PhotographicSensitivity, 100),
        ascii(Tag::DateTimeOriginal, "2024:01:15 10:30:00"),
    ]
}

/// Write a JPEG with the given EXIF fields into `dir` and return its path.
fn photo_with_exif(dir: &Path, name: &str, width: u32, height: u32, fields: &[exif::Field]) -> PathBuf {
    let jpeg = embed_exif_app1(&jpeg_bytes(width, height), &exif_block(fields)).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, jpeg).unwrap();
    path
}

fn out_path(dir: &Path) -> PathBuf {
    dir.join("watermarked-image.jpg")
}

fn mark_to(dir: &Path) -> MarkOptions {
    MarkOptions {
        output: Some(out_path(dir)),
        ..MarkOptions::default()
    }
}

// =========================================================================
// Full runs
// =========================================================================

#[test]
fn watermarked_canvas_is_photo_plus_band() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 1000, 1000, &iphone_fields());

    let outcome = run_mark(&photo, &MarkConfig::default(), &mark_to(tmp.path())).unwrap();

    assert!(outcome.watermarked());
    assert_eq!((outcome.canvas_width, outcome.canvas_height), (1000, 1080));

    let written = image::open(out_path(tmp.path())).unwrap();
    assert_eq!((written.width(), written.height()), (1000, 1080));

    let info = outcome.info.unwrap();
    assert_eq!(info.info_line(), "24mm f/1.78 1/250 ISO100");
    assert_eq!(info.model, "iPhone 15 Pro");
}

#[test]
fn marking_twice_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 640, 480, &iphone_fields());

    let first_out = tmp.path().join("a.jpg");
    let second_out = tmp.path().join("b.jpg");
    for out in [&first_out, &second_out] {
        let opts = MarkOptions {
            output: Some(out.clone()),
            ..MarkOptions::default()
        };
        run_mark(&photo, &MarkConfig::default(), &opts).unwrap();
    }

    let a = std::fs::read(first_out).unwrap();
    let b = std::fs::read(second_out).unwrap();
    assert_eq!(a, b);
}

#[test]
fn photo_without_exif_ships_unwatermarked() {
    let tmp = TempDir::new().unwrap();
    let img = image::RgbImage::from_pixel(500, 500, image::Rgb([40, 40, 40]));
    let photo = tmp.path().join("plain.png");
    img.save(&photo).unwrap();

    let outcome = run_mark(&photo, &MarkConfig::default(), &mark_to(tmp.path())).unwrap();

    assert!(!outcome.watermarked());
    assert!(outcome.info.is_none());

    let written = image::open(out_path(tmp.path())).unwrap();
    assert_eq!((written.width(), written.height()), (500, 500));
}

#[test]
fn unrecognized_brand_composes_without_a_mark() {
    let tmp = TempDir::new().unwrap();
    let fields = vec![
        ascii(Tag::Make, "Samsung"),
        ascii(Tag::Model, "Galaxy S24"),
        ascii(Tag::DateTimeOriginal, "2024:03:02 08:00:00"),
    ];
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 1000, 1000, &fields);

    let outcome = run_mark(&photo, &MarkConfig::default(), &mark_to(tmp.path())).unwrap();

    // Same geometry as a recognized brand, no error, no warning.
    assert_eq!((outcome.canvas_width, outcome.canvas_height), (1000, 1080));
    assert!(outcome.mark_warning.is_none());
    assert_eq!(outcome.info.unwrap().brand, "Samsung");
}

#[test]
fn manual_mode_overrides_extracted_fields() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 800, 600, &iphone_fields());

    let opts = MarkOptions {
        output: Some(out_path(tmp.path())),
        brand: Some("Leica".into()),
        model: Some("M11 Monochrom".into()),
    };
    let outcome = run_mark(&photo, &MarkConfig::default(), &opts).unwrap();

    let info = outcome.info.unwrap();
    assert_eq!(info.brand, "Leica");
    assert_eq!(info.model, "M11 Monochrom");
    // Exposure fields come from the EXIF block untouched.
    assert_eq!(info.iso.as_deref(), Some("ISO100"));
}

#[test]
fn recognized_brand_with_missing_logo_degrades_with_warning() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 800, 600, &iphone_fields());

    let mut config = MarkConfig::default();
    config.logos.dir = tmp.path().join("no-such-dir");
    let outcome = run_mark(&photo, &config, &mark_to(tmp.path())).unwrap();

    assert!(outcome.watermarked());
    assert!(outcome.mark_warning.unwrap().contains("apple.png"));
}

#[cfg(not(feature = "heif"))]
#[test]
fn heic_input_fails_fast_without_the_heif_build() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("IMG_0001.heic");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&24u32.to_be_bytes());
    bytes.extend_from_slice(b"ftypheic");
    bytes.extend_from_slice(&[0; 12]);
    std::fs::write(&path, bytes).unwrap();

    let err = run_mark(&path, &MarkConfig::default(), &mark_to(tmp.path())).unwrap_err();
    assert!(err.to_string().contains("heif"), "{err}");
}

// =========================================================================
// inspect
// =========================================================================

#[test]
fn inspect_reports_band_geometry_and_metadata() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 1000, 1000, &iphone_fields());

    let report = run_inspect(&photo).unwrap();
    assert_eq!(report.file_name, "shot.jpg");
    assert_eq!((report.width, report.height), (1000, 1000));
    assert_eq!(report.band_height, 80.0);
    assert_eq!((report.canvas_width, report.canvas_height), (1000, 1080));
    assert_eq!(report.camera_info.unwrap().aperture.as_deref(), Some("f/1.78"));
}

#[test]
fn inspect_serializes_to_json() {
    let tmp = TempDir::new().unwrap();
    let photo = photo_with_exif(tmp.path(), "shot.jpg", 400, 300, &iphone_fields());

    let report = run_inspect(&photo).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"cameraInfo\""));
    assert!(json.contains("\"focalLength\":\"24mm\""));
    assert!(json.contains("\"shutterSpeed\":\"1/250\""));
}
