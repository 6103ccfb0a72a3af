use super::*;

fn small() -> Canvas {
    Canvas::new(CanvasSize {
        width: 40,
        height: 30,
    })
    .unwrap()
}

fn close(a: [u8; 4], b: [u8; 4], tol: i32) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (i32::from(*x) - i32::from(*y)).abs() <= tol)
}

#[test]
fn new_canvas_is_transparent_with_fixed_bounds() {
    let mut c = small();
    assert_eq!((c.width(), c.height()), (40, 30));
    let img = c.to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (40, 30));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let err = Canvas::new(CanvasSize {
        width: 0,
        height: 5,
    })
    .err()
    .unwrap();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn fill_rectangle_covers_exact_pixels() {
    let mut c = small();
    c.fill_rectangle(10.0, 5.0, 20.0, 10.0, Rgba8::rgba(0, 0, 0, 204));
    let img = c.to_rgba_image().unwrap();
    assert!(close(img.get_pixel(10, 5).0, [0, 0, 0, 204], 1));
    assert!(close(img.get_pixel(29, 14).0, [0, 0, 0, 204], 1));
    assert_eq!(img.get_pixel(9, 5).0[3], 0);
    assert_eq!(img.get_pixel(30, 14).0[3], 0);
    assert_eq!(img.get_pixel(10, 15).0[3], 0);
}

#[test]
fn fill_rectangle_does_not_change_active_color() {
    let mut c = small();
    c.set_color(Rgba8::WHITE);
    c.fill_rectangle(0.0, 0.0, 1.0, 1.0, Rgba8::BLACK);
    assert_eq!(c.color(), Rgba8::WHITE);
}

#[test]
fn draw_image_at_places_top_left_corner() {
    let mut c = small();
    let red = RgbaImage::from_pixel(6, 4, image::Rgba([255, 0, 0, 255]));
    c.draw_image_at(&red, 3.0, 2.0).unwrap();
    let img = c.to_rgba_image().unwrap();
    assert!(close(img.get_pixel(4, 3).0, [255, 0, 0, 255], 2));
    assert!(close(img.get_pixel(7, 4).0, [255, 0, 0, 255], 2));
    assert_eq!(img.get_pixel(1, 1).0[3], 0);
    assert_eq!(img.get_pixel(12, 8).0[3], 0);
}

#[test]
fn draw_image_anchored_centers_on_point() {
    let mut c = small();
    let blue = RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 255, 255]));
    c.draw_image_anchored(&blue, 20.0, 15.0, 0.5, 0.5).unwrap();
    let img = c.to_rgba_image().unwrap();
    assert!(close(img.get_pixel(20, 15).0, [0, 0, 255, 255], 2));
    assert!(close(img.get_pixel(16, 11).0, [0, 0, 255, 255], 2));
    assert_eq!(img.get_pixel(13, 15).0[3], 0);
    assert_eq!(img.get_pixel(26, 15).0[3], 0);
}

#[test]
fn push_pop_isolates_rotation_and_color() {
    let mut c = small();
    c.set_color(Rgba8::WHITE);
    c.push();
    c.set_color(Rgba8::BLACK);
    c.rotate_about(0.5, 20.0, 15.0);
    assert_ne!(c.transform(), Affine::IDENTITY);
    c.pop().unwrap();
    assert_eq!(c.transform(), Affine::IDENTITY);
    assert_eq!(c.color(), Rgba8::WHITE);
    assert!(c.pop().is_err());
}

#[test]
fn rotation_affects_only_later_draws() {
    let mut c = small();
    c.fill_rectangle(0.0, 0.0, 4.0, 4.0, Rgba8::WHITE);
    c.rotate_about(std::f64::consts::FRAC_PI_2, 20.0, 15.0);
    // A quarter turn about (20, 15) maps x in [30, 34), y in [13, 17) to x in [18, 22), y in [25, 29).
    c.fill_rectangle(30.0, 13.0, 4.0, 4.0, Rgba8::rgba(0, 255, 0, 255));
    let img = c.to_rgba_image().unwrap();

    assert!(close(img.get_pixel(1, 1).0, [255, 255, 255, 255], 1));
    assert!(close(img.get_pixel(20, 27).0, [0, 255, 0, 255], 2));
    assert_eq!(img.get_pixel(32, 15).0[3], 0);
}

#[test]
fn stroke_circle_paints_ring_only() {
    let mut c = small();
    c.set_color(Rgba8::WHITE);
    c.stroke_circle(20.0, 15.0, 10.0, 4.0);
    let img = c.to_rgba_image().unwrap();
    assert!(close(img.get_pixel(30, 15).0, [255, 255, 255, 255], 8));
    assert_eq!(img.get_pixel(20, 15).0[3], 0);
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn text_needs_a_loaded_font() {
    let mut c = small();
    let err = c.draw_string("x", 0.0, 10.0).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert!(c.measure_text("x").is_err());
}

#[test]
fn draw_string_puts_ink_above_baseline() {
    let mut c = Canvas::new(CanvasSize {
        width: 200,
        height: 80,
    })
    .unwrap();
    c.load_font(Path::new("tests/data/fonts/DejaVuSans.ttf"), 40.0)
        .unwrap();
    c.set_color(Rgba8::WHITE);
    c.draw_string("HI", 10.0, 50.0).unwrap();
    let img = c.to_rgba_image().unwrap();

    let inked_rows: Vec<u32> = (0..80)
        .filter(|&y| (0..200).any(|x| img.get_pixel(x, y).0[3] > 128))
        .collect();
    assert!(!inked_rows.is_empty());
    assert!(*inked_rows.last().unwrap() <= 50);
    assert!(*inked_rows.first().unwrap() >= 10);
    assert!((0..10).all(|x| (0..80).all(|y| img.get_pixel(x, y).0[3] == 0)));
}

#[test]
fn wrapped_text_stacks_lines_by_spacing() {
    let mut c = Canvas::new(CanvasSize {
        width: 300,
        height: 300,
    })
    .unwrap();
    c.load_font(Path::new("tests/data/fonts/DejaVuSans.ttf"), 40.0)
        .unwrap();
    c.set_color(Rgba8::WHITE);
    c.draw_wrapped_text("I\nI", 10.0, 0.0, 280.0, 2.0, TextAlign::Left)
        .unwrap();
    let img = c.to_rgba_image().unwrap();

    // fh = 30: baselines at 30 and 90.
    let inked = |y: u32| (0..300).any(|x| img.get_pixel(x, y).0[3] > 128);
    assert!(inked(20));
    assert!(!inked(45));
    assert!(inked(80));
    assert!(!inked(100));
}
