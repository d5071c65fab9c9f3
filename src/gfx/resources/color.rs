//! Color helpers
//!
//! Scene colors are authored as `0xRRGGBB` values in sRGB. Shading happens in
//! linear space, so colors are converted right before they reach the GPU.

/// Splits `0xRRGGBB` into sRGB components in `0.0..=1.0`
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// sRGB transfer function, decoded
pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn srgb_to_linear(color: [f32; 3]) -> [f32; 3] {
    color.map(srgb_channel_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_into_channels() {
        assert_eq!(hex_to_srgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_srgb(0x000000), [0.0, 0.0, 0.0]);
        let green = hex_to_srgb(0x21a71c);
        assert!((green[1] - 167.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn linear_conversion_keeps_endpoints_and_order() {
        assert_eq!(srgb_channel_to_linear(0.0), 0.0);
        assert!((srgb_channel_to_linear(1.0) - 1.0).abs() < 1e-6);

        let mut previous = -1.0;
        for step in 0..=255 {
            let linear = srgb_channel_to_linear(step as f32 / 255.0);
            assert!(linear > previous);
            previous = linear;
        }
        // mid grey is darker once linearized
        assert!(srgb_channel_to_linear(0.5) < 0.25);
    }
}
