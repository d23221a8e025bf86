//! Mel-scale initialization of the filter cutoffs.
//!
//! Only used once, at construction: the learnable parameters are seeded from
//! [`band_edges`] and afterwards live on their own.

use crate::constants::{LOWEST_CUTOFF_HZ, MEL_BREAK_HZ, MEL_SCALE, NYQUIST_MARGIN_HZ};

#[inline]
pub fn hz_to_mel(hz: f64) -> f64 {
    MEL_SCALE * (1.0 + hz / MEL_BREAK_HZ).log10()
}

#[inline]
pub fn mel_to_hz(mel: f64) -> f64 {
    MEL_BREAK_HZ * (10f64.powf(mel / MEL_SCALE) - 1.0)
}

/// `n_filt` frequencies (Hz) equally spaced on the mel axis, from mel value
/// `fmin` up to the mel value of Nyquist.
///
/// `fmin` is a point on the mel axis, not a frequency: the grid starts at
/// `mel_to_hz(fmin)`.
pub fn mel_points(sample_rate: f64, n_filt: usize, fmin: f64) -> Vec<f64> {
    let high_mel = hz_to_mel(sample_rate / 2.0);
    linspace(fmin, high_mel, n_filt)
        .into_iter()
        .map(mel_to_hz)
        .collect()
}

/// Lower / upper cutoffs (Hz) for each filter.
///
/// Filter `i` spans from its left neighbour's point to its right neighbour's
/// point, so adjacent filters overlap. The outermost edges are pinned to
/// [`LOWEST_CUTOFF_HZ`] and `fs / 2 - NYQUIST_MARGIN_HZ`.
pub fn band_edges(f_cos: &[f64], sample_rate: f64) -> (Vec<f64>, Vec<f64>) {
    let n = f_cos.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut b1: Vec<f64> = (0..n).map(|i| f_cos[(i + n - 1) % n]).collect();
    let mut b2: Vec<f64> = (0..n).map(|i| f_cos[(i + 1) % n]).collect();
    b1[0] = LOWEST_CUTOFF_HZ;
    b2[n - 1] = sample_rate / 2.0 - NYQUIST_MARGIN_HZ;
    (b1, b2)
}

/// Initial `(filt_b1, filt_band)` as fractions of the sample rate.
pub fn init_params(sample_rate: f64, n_filt: usize, fmin: f64) -> (Vec<f32>, Vec<f32>) {
    let f_cos = mel_points(sample_rate, n_filt, fmin);
    let (b1, b2) = band_edges(&f_cos, sample_rate);

    let filt_b1 = b1.iter().map(|&lo| (lo / sample_rate) as f32).collect();
    let filt_band = b1
        .iter()
        .zip(&b2)
        .map(|(&lo, &hi)| ((hi - lo) / sample_rate) as f32)
        .collect();
    (filt_b1, filt_band)
}

// numpy-style linspace: endpoints included, a single step yields `start`
fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (steps - 1) as f64;
            let mut out: Vec<f64> = (0..steps).map(|i| start + i as f64 * step).collect();
            out[steps - 1] = stop;
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mel_round_trip() {
        for hz in [0.0, 30.0, 440.0, 1000.0, 7900.0, 22_050.0] {
            let back = mel_to_hz(hz_to_mel(hz));
            assert!((back - hz).abs() < 1e-6 * hz.max(1.0), "{hz} -> {back}");
        }
    }

    #[test]
    fn mel_of_1000hz_is_about_1000() {
        assert!((hz_to_mel(1000.0) - 1000.0).abs() < 0.5);
    }

    #[test]
    fn points_strictly_increase() {
        for &(fs, n, fmin) in &[
            (8_000.0, 2, 80.0),
            (16_000.0, 4, 80.0),
            (16_000.0, 80, 80.0),
            (44_100.0, 128, 0.0),
            (22_050.0, 40, 300.0),
        ] {
            let pts = mel_points(fs, n, fmin);
            assert_eq!(pts.len(), n);
            assert!(
                pts.windows(2).all(|w| w[0] < w[1]),
                "not increasing for fs={fs} n={n}"
            );
        }
    }

    #[test]
    fn points_span_fmin_to_nyquist() {
        let pts = mel_points(16_000.0, 10, 80.0);
        assert!((pts[0] - mel_to_hz(80.0)).abs() < 1e-9);
        assert!((pts[9] - 8_000.0).abs() < 1e-6);
    }

    #[test]
    fn single_filter_uses_fmin() {
        let pts = mel_points(16_000.0, 1, 80.0);
        assert_eq!(pts, vec![mel_to_hz(80.0)]);
    }

    #[test]
    fn band_edges_shift_and_clamp() {
        let f = [100.0, 200.0, 300.0, 400.0];
        let (b1, b2) = band_edges(&f, 16_000.0);
        assert_eq!(b1, vec![30.0, 100.0, 200.0, 300.0]);
        assert_eq!(b2, vec![200.0, 300.0, 400.0, 7_900.0]);
    }

    #[test]
    fn band_edges_single_filter() {
        let (b1, b2) = band_edges(&[500.0], 16_000.0);
        assert_eq!(b1, vec![30.0]);
        assert_eq!(b2, vec![7_900.0]);
    }

    #[test]
    fn init_params_match_reference_bands() {
        // f_cos = [51.4958, 1000.0334, 3145.8147, 8000.0] Hz
        let (b1, band) = init_params(16_000.0, 4, 80.0);
        let want_b1 = [0.001_875, 0.003_218_487_4, 0.062_502_088, 0.196_613_42];
        let want_band = [0.060_627_088, 0.193_394_93, 0.437_497_9, 0.297_136_58];
        for (got, want) in b1.iter().zip(want_b1).chain(band.iter().zip(want_band)) {
            assert!((got - want).abs() < 1e-7, "{b1:?} {band:?}");
        }
    }

    #[test]
    fn init_params_are_fractions_of_fs() {
        let (b1, band) = init_params(16_000.0, 4, 80.0);
        assert_eq!(b1.len(), 4);
        assert_eq!(band.len(), 4);
        assert!((b1[0] - 30.0 / 16_000.0).abs() < 1e-9);
        assert!(band.iter().all(|&b| b > 0.0 && b < 0.5));
        // last filter ends at fs/2 - 100
        let top = b1[3] + band[3];
        assert!((top - 7_900.0 / 16_000.0).abs() < 1e-6);
    }
}
