/// Concert A, the frequency of 0 V on a 1 V/octave pitch input.
pub const A4_HZ: f32 = 440.0;

/// 1 V/octave: every volt doubles the frequency, 0 V is A4.
#[inline]
pub fn voct_to_freq(voltage: f32) -> f32 {
    A4_HZ * voltage.exp2()
}

/// Pitch in Hz for a base voltage offset by a CV limited to ±`cv_range`.
#[inline]
pub fn pitch_to_freq(base_v: f32, cv_v: f32, cv_range: f32) -> f32 {
    let range = cv_range.abs();
    voct_to_freq(base_v + cv_v.clamp(-range, range))
}

/// Keep a frequency below `guard` × sample rate.
#[inline]
pub fn nyquist_clamp(freq: f32, sample_rate: f32, guard: f32) -> f32 {
    freq.min(guard * sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octaves_double_frequency() {
        assert_eq!(voct_to_freq(0.0), 440.0);
        assert!((voct_to_freq(1.0) - 880.0).abs() < 1e-3);
        assert!((voct_to_freq(-1.0) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn default_bass_pitch_is_c2() {
        let c2 = voct_to_freq(-2.75);
        assert!((c2 - 65.406).abs() < 0.01, "{c2}");
    }

    #[test]
    fn cv_is_limited_to_range() {
        let top = pitch_to_freq(-2.75, 10.0, 2.0);
        assert!((top - voct_to_freq(-0.75)).abs() < 1e-3);
        let bottom = pitch_to_freq(-2.75, -10.0, 2.0);
        assert!((bottom - voct_to_freq(-4.75)).abs() < 1e-3);
    }

    #[test]
    fn nyquist_guard_caps_frequency() {
        assert_eq!(nyquist_clamp(30_000.0, 48_000.0, 0.45), 21_600.0);
        assert_eq!(nyquist_clamp(100.0, 48_000.0, 0.45), 100.0);
    }
}
