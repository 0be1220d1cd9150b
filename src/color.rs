use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour scale: correlation value → RGB
// ---------------------------------------------------------------------------

/// Positive end of the scale (violet); also the diagonal.
pub const POSITIVE: Srgb<u8> = Srgb::new(124, 58, 237);
/// Negative end of the scale (blue).
pub const NEGATIVE: Srgb<u8> = Srgb::new(59, 130, 246);

const LABEL_LIGHT: [u8; 3] = [255, 255, 255];
const LABEL_DARK: [u8; 3] = [0x37, 0x41, 0x51];

/// Fill colour for a correlation value in `[-1, 1]`.
///
/// White at 0, fading toward violet for positive and blue for negative
/// values with intensity |v|.
pub fn correlation_color(value: f64) -> [u8; 3] {
    if value == 1.0 {
        return rgb(POSITIVE);
    }
    let intensity = value.abs().min(1.0) as f32;
    let target = if value > 0.0 { POSITIVE } else { NEGATIVE };
    blend_from_white(target, intensity)
}

/// Text colour that stays readable on [`correlation_color`].
pub fn label_color(value: f64) -> [u8; 3] {
    if value.abs() > 0.5 {
        LABEL_LIGHT
    } else {
        LABEL_DARK
    }
}

/// Mix in linear RGB, so midpoints come out lighter than a plain sRGB lerp.
fn blend_from_white(target: Srgb<u8>, intensity: f32) -> [u8; 3] {
    let white: LinSrgb = Srgb::new(1.0f32, 1.0, 1.0).into_linear();
    let target: LinSrgb = target.into_format::<f32>().into_linear();
    let mixed = Srgb::<f32>::from_linear(white.mix(target, intensity));
    rgb(mixed.into_format::<u8>())
}

fn rgb(c: Srgb<u8>) -> [u8; 3] {
    [c.red, c.green, c.blue]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_is_violet() {
        assert_eq!(correlation_color(1.0), [0x7c, 0x3a, 0xed]);
        assert_eq!(correlation_color(1.0), rgb(POSITIVE));
    }

    #[test]
    fn test_midpoint_is_lighter_than_srgb_lerp() {
        // A straight sRGB interpolation gives (190, 157, 246) at 0.5.
        let c = correlation_color(0.5);
        assert!(c[0] > 190 && c[1] > 157, "{c:?}");
        assert!(c[2] >= 237, "{c:?}");
    }

    #[test]
    fn test_zero_is_white() {
        assert_eq!(correlation_color(0.0), [255, 255, 255]);
    }

    #[test]
    fn test_full_negative_reaches_blue() {
        let c = correlation_color(-1.0);
        for (got, want) in c.iter().zip([59u8, 130, 246]) {
            assert!(got.abs_diff(want) <= 1, "{c:?}");
        }
    }

    #[test]
    fn test_sign_picks_hue() {
        let pos = correlation_color(0.6);
        let neg = correlation_color(-0.6);
        // Violet has more red than green, blue the other way round.
        assert!(pos[0] > pos[1]);
        assert!(neg[1] > neg[0]);
    }

    #[test]
    fn test_label_contrast() {
        assert_eq!(label_color(0.9), [255, 255, 255]);
        assert_eq!(label_color(-0.2), [0x37, 0x41, 0x51]);
    }
}
