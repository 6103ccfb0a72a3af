use super::*;

fn reference_alpha(m: &CircleMask, x: i32, y: i32) -> u8 {
    let xx = f64::from(x - m.cx) + 0.5;
    let yy = f64::from(y - m.cy) + 0.5;
    let rr = f64::from(m.r);
    if xx * xx + yy * yy < rr * rr { 255 } else { 0 }
}

#[test]
fn alpha_matches_point_in_circle_everywhere() {
    for r in 0..14 {
        let m = CircleMask::new(7, -3, r);
        for y in -25..20 {
            for x in -15..30 {
                assert_eq!(m.alpha_at(x, y), reference_alpha(&m, x, y), "r={r} ({x},{y})");
            }
        }
    }
}

#[test]
fn pixel_center_offset_is_symmetric() {
    let m = CircleMask::new(0, 0, 1);
    for (x, y) in [(-1, -1), (0, -1), (-1, 0), (0, 0)] {
        assert_eq!(m.alpha_at(x, y), 255, "({x},{y})");
    }
    for (x, y) in [(1, 0), (-2, 0), (0, 1), (0, -2)] {
        assert_eq!(m.alpha_at(x, y), 0, "({x},{y})");
    }
}

#[test]
fn near_boundary_is_strict() {
    let m = CircleMask::new(0, 0, 5);
    // 4.5² + 0.5² = 20.5 < 25
    assert_eq!(m.alpha_at(4, 0), 255);
    // 4.5² + 2.5² = 26.5 >= 25
    assert_eq!(m.alpha_at(4, 2), 0);
    // 5.5² > 25
    assert_eq!(m.alpha_at(5, 0), 0);
}

#[test]
fn zero_radius_is_empty() {
    let m = CircleMask::new(3, 3, 0);
    assert_eq!(m.bounds(), (3, 3, 3, 3));
    assert_eq!(m.alpha_at(3, 3), 0);
}

#[test]
fn inscribed_uses_shorter_side() {
    assert_eq!(CircleMask::inscribed(180, 180), CircleMask::new(90, 90, 90));
    assert_eq!(CircleMask::inscribed(180, 120), CircleMask::new(90, 60, 60));
}

#[test]
fn masked_raster_keeps_inside_and_clears_outside() {
    let src = RgbaImage::from_pixel(20, 20, image::Rgba([200, 30, 60, 255]));
    let mask = CircleMask::inscribed(20, 20);
    let out = apply_circle_mask(&src, &mask);

    assert_eq!(out.dimensions(), (20, 20));
    for (x, y, px) in out.enumerate_pixels() {
        if mask.alpha_at(x as i32, y as i32) == 255 {
            assert_eq!(px.0, [200, 30, 60, 255], "({x},{y})");
        } else {
            assert_eq!(px.0, [0, 0, 0, 0], "({x},{y})");
        }
    }
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
    assert_eq!(out.get_pixel(10, 10).0[3], 255);
}

#[test]
fn mask_larger_than_raster_stays_in_bounds() {
    let src = RgbaImage::from_pixel(6, 4, image::Rgba([1, 2, 3, 255]));
    let out = apply_circle_mask(&src, &CircleMask::new(3, 2, 50));
    assert!(out.pixels().all(|p| p.0 == [1, 2, 3, 255]));
}
