//! Pixel-level helpers shared by the canvas readback and the avatar mask compositor.

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra 8-bit coverage weight (mask alpha) applied to `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), cov);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 255 {
        return px;
    }
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = unpremultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
