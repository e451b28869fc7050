/// sRGB-encoded channel to linear light
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` to linear RGB, the space the shaders light in.
/// The surface is sRGB, so the GPU re-encodes on write.
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

pub fn hex_to_linear_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear_rgb(hex);
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_linear_primaries() {
        assert_eq!(hex_to_linear_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_linear_rgb(0x0000ff), [0.0, 0.0, 1.0]);
        assert_eq!(hex_to_linear_rgb(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_linear_rgb(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hex_to_linear_mid_grey() {
        // 0x40 = 64/255 sRGB is roughly 0.051 linear
        let rgb = hex_to_linear_rgb(0x404040);
        for c in rgb {
            assert!((c - 0.0513).abs() < 0.001, "got {}", c);
        }
    }

    #[test]
    fn test_hex_to_linear_rgba_keeps_alpha() {
        assert_eq!(hex_to_linear_rgba(0xffffff, 0.5)[3], 0.5);
    }
}
