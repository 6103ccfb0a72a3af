use std::io::Cursor;

use super::*;

fn encoded(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn rgb_fixture() -> image::DynamicImage {
    image::DynamicImage::ImageRgb8(image::RgbImage::from_fn(8, 6, |x, y| {
        image::Rgb([(x * 30) as u8, (y * 40) as u8, 90])
    }))
}

#[test]
fn png_and_jpeg_decode_to_non_empty_rasters() {
    for format in [ImageFormat::Png, ImageFormat::Jpeg] {
        let bytes = encoded(rgb_fixture(), format);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.dimensions(), (8, 6), "{format:?}");
    }
}

#[test]
fn sniffing_ignores_extension_and_reads_content() {
    let bytes = encoded(rgb_fixture(), ImageFormat::Png);
    assert_eq!(sniff_format(&bytes).unwrap(), SupportedFormat::Png);

    let bytes = encoded(rgb_fixture(), ImageFormat::Jpeg);
    assert_eq!(sniff_format(&bytes).unwrap(), SupportedFormat::Jpeg);
}

#[test]
fn third_format_is_unsupported() {
    let rgba = image::DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
    for format in [ImageFormat::Gif, ImageFormat::Bmp] {
        let bytes = encoded(rgba.clone(), format);
        let err = decode_image(&bytes).unwrap_err();
        assert!(
            matches!(err, CardError::UnsupportedImageFormat(_)),
            "{format:?}: {err}"
        );
    }
}

#[test]
fn unrecognized_bytes_are_a_decode_error() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, CardError::ImageDecode(_)), "{err}");
    assert!(matches!(
        sniff_format(b"definitely not an image"),
        Err(CardError::ImageDecode(_))
    ));
}

#[test]
fn truncated_png_is_a_decode_error() {
    let bytes = encoded(rgb_fixture(), ImageFormat::Png);
    let err = decode_image(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err, CardError::ImageDecode(_)), "{err}");
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_image(Path::new("does/not/exist.png")).unwrap_err();
    assert!(matches!(err, CardError::ImageLoad { .. }));
}

#[test]
fn jpeg_saved_with_png_extension_still_decodes() {
    let dir = std::env::temp_dir().join(format!("ogcard_decode_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("actually_a_jpeg.png");
    std::fs::write(&path, encoded(rgb_fixture(), ImageFormat::Jpeg)).unwrap();

    let img = load_image(&path).unwrap();
    assert_eq!(img.dimensions(), (8, 6));
}
