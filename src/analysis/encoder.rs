/// Map a normalized intensity to a byte: `round(clamp(x, 0, 1) * 255)`.
///
/// Out-of-range values saturate at the boundary; they never wrap.
#[inline]
pub fn encode(intensity: f32) -> u8 {
    let clamped = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };
    (clamped * 255.0 + 0.5) as u8
}

/// Normalizes raw magnitudes against a full-scale constant and packs them
/// into bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityEncoder {
    full_scale: f32,
}

impl IntensityEncoder {
    /// `full_scale` is the magnitude that maps to 255. Values above it saturate.
    pub fn new(full_scale: f32) -> Self {
        Self { full_scale }
    }

    pub fn full_scale(&self) -> f32 {
        self.full_scale
    }

    /// Scale in place so every entry ends up in `[0, 1]`.
    pub fn normalize(&self, intensities: &mut [f32]) {
        let gain = 1.0 / self.full_scale;
        for value in intensities.iter_mut() {
            let scaled = *value * gain;
            *value = if scaled.is_nan() {
                0.0
            } else {
                scaled.clamp(0.0, 1.0)
            };
        }
    }

    /// Normalize `intensities` and write one byte per entry into `frame`.
    pub fn encode_into(&self, intensities: &mut [f32], frame: &mut [u8]) {
        debug_assert!(frame.len() <= intensities.len());
        self.normalize(intensities);
        for (byte, &value) in frame.iter_mut().zip(intensities.iter()) {
            *byte = encode(value);
        }
    }
}

impl Default for IntensityEncoder {
    fn default() -> Self {
        Self::new(1.0)
    }
}
