use super::*;

fn fixture() -> RgbaImage {
    RgbaImage::from_fn(5, 3, |x, y| {
        image::Rgba([(x * 50) as u8, (y * 80) as u8, 7, (40 + x * 40) as u8])
    })
}

#[test]
fn png_round_trip_is_pixel_identical() {
    let img = fixture();
    let bytes = encode_png(&img).unwrap();
    let back = crate::assets::decode::decode_image(&bytes).unwrap();
    assert_eq!(back.as_raw(), img.as_raw());
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir()
        .join(format!("ogcard_encode_{}", std::process::id()))
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("out.png");

    write_png(&fixture(), &path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.as_raw(), fixture().as_raw());
}

#[test]
fn unwritable_destination_is_a_write_error() {
    let dir = std::env::temp_dir().join(format!("ogcard_encode_dir_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    // The destination is an existing directory, so File::create fails.
    let err = write_png(&fixture(), &dir).unwrap_err();
    assert!(matches!(err, CardError::Write { .. }), "{err}");
}
