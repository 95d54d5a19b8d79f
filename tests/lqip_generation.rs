//! End-to-end placeholder generation against real files.
//!
//! Each test builds a throwaway project root with `src/assets/` and runs the
//! production `RustBackend` over synthetic PNGs.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use folio::lqip::{
    AssetRef, FALLBACK_PLACEHOLDER, ImageHandle, LqipGenerator, LqipOptions, SourceImage,
};
use image::{ImageEncoder, RgbImage};
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32, shade: u8) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, shade])
    });
    let file = std::fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let assets = tmp.path().join("src/assets");
    write_png(&assets.join("x.png"), 200, 100, 10);
    write_png(&assets.join("works/a.png"), 120, 160, 200);
    write_png(&assets.join("works/b.png"), 64, 64, 90);
    tmp
}

fn decode(data_url: &str) -> image::DynamicImage {
    let b64 = data_url
        .strip_prefix("data:image/webp;base64,")
        .expect("webp data url");
    image::load_from_memory(&STANDARD.decode(b64).unwrap()).unwrap()
}

#[test]
fn placeholder_is_small_webp_data_url() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());
    let url = lqip.placeholder("x.png");
    let img = decode(&url);
    assert_eq!((img.width(), img.height()), (20, 10));
}

#[test]
fn repeated_request_is_served_from_cache() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());
    let first = lqip.placeholder("x.png");

    // Gone from disk: a second read would fail and yield the fallback.
    std::fs::remove_file(tmp.path().join("src/assets/x.png")).unwrap();
    let second = lqip.placeholder("x.png");

    assert_eq!(first, second);
    assert_ne!(second, FALLBACK_PLACEHOLDER);
    assert_eq!(lqip.stats().hits, 1);
    assert_eq!(lqip.stats().misses, 1);
}

#[test]
fn missing_asset_yields_fallback() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());
    assert_eq!(lqip.placeholder("nope.png"), FALLBACK_PLACEHOLDER);
    assert_eq!(
        FALLBACK_PLACEHOLDER,
        "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7"
    );
}

#[test]
fn corrupt_asset_yields_fallback() {
    let tmp = project();
    std::fs::write(tmp.path().join("src/assets/bad.png"), b"not a png").unwrap();
    let lqip = LqipGenerator::new(tmp.path());
    assert_eq!(lqip.placeholder("bad.png"), FALLBACK_PLACEHOLDER);
    assert_eq!(lqip.stats().failures, 1);
}

#[test]
fn batch_keeps_input_order_and_isolates_failures() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());
    let refs: Vec<AssetRef> = vec![
        "works/a.png".into(),
        "missing.png".into(),
        "works/b.png".into(),
    ];
    let urls = lqip.placeholders(&refs);

    assert_eq!(urls.len(), 3);
    let a = decode(&urls[0]);
    assert_eq!((a.width(), a.height()), (20, 27));
    assert_eq!(urls[1], FALLBACK_PLACEHOLDER);
    let b = decode(&urls[2]);
    assert_eq!((b.width(), b.height()), (20, 20));
}

#[test]
fn handles_resolve_through_source_root_and_fs_path() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());

    let by_src = lqip.placeholder_for(&AssetRef::Handle(ImageHandle::from_src(
        "/src/assets/works/b.png",
    )));
    let fs_path = tmp.path().join("src/assets/works/b.png");
    let by_fs_path = lqip.placeholder_for(&AssetRef::Handle(ImageHandle {
        src: "/_astro/b.hash.png".to_string(),
        fs_path: Some(fs_path.to_string_lossy().to_string()),
    }));
    let dev = lqip.placeholder_for(&AssetRef::Handle(ImageHandle::from_src(format!(
        "/@fs{}?origWidth=64",
        fs_path.display()
    ))));

    assert_ne!(by_src, FALLBACK_PLACEHOLDER);
    assert_eq!(by_src, by_fs_path);
    assert_eq!(by_src, dev);
    assert_eq!(lqip.stats().misses, 1);
}

#[test]
fn grayscale_and_width_options() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path())
        .with_options(LqipOptions::default().width(10).grayscale(true));
    let img = decode(&lqip.placeholder("works/a.png")).to_rgb8();
    assert_eq!(img.width(), 10);
    for px in img.pixels() {
        assert_eq!(px.0[0], px.0[1]);
        assert_eq!(px.0[1], px.0[2]);
    }
}

#[test]
fn image_records_get_placeholders() {
    let tmp = project();
    let lqip = LqipGenerator::new(tmp.path());
    let out = lqip.with_placeholders(vec![
        SourceImage {
            src: "works/b.png".into(),
            alt: "Beacon".to_string(),
        },
        SourceImage {
            src: "gone.png".into(),
            alt: "Gone".to_string(),
        },
    ]);
    assert_eq!(out[0].alt, "Beacon");
    assert_ne!(out[0].lqip, FALLBACK_PLACEHOLDER);
    assert_eq!(out[1].lqip, FALLBACK_PLACEHOLDER);
}
