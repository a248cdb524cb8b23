//! DSP Primitives
//!
//! Pure-Rust kernel under the voice extractor: Cooley-Tukey FFT, Hann
//! window, HTK mel filterbank, orthonormal DCT-II. Fixed-size inputs only;
//! callers zero-pad frames to the FFT size.

use std::f32::consts::PI;

/// Periodic Hann window of the given length
pub fn hann_window(len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f32 / len as f32).cos())
        .collect()
}

/// In-place radix-2 Cooley-Tukey FFT.
///
/// `re`/`im` must share a power-of-two length.
pub fn fft_in_place(re: &mut [f32], im: &mut [f32]) {
    let n = re.len();
    debug_assert!(n.is_power_of_two());
    debug_assert_eq!(n, im.len());

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    // Butterfly passes
    let mut len = 2;
    while len <= n {
        let ang = -2.0 * PI / len as f32;
        let (step_re, step_im) = (ang.cos(), ang.sin());
        for start in (0..n).step_by(len) {
            let mut w_re = 1.0f32;
            let mut w_im = 0.0f32;
            for k in 0..len / 2 {
                let even = start + k;
                let odd = start + k + len / 2;
                let t_re = re[odd] * w_re - im[odd] * w_im;
                let t_im = re[odd] * w_im + im[odd] * w_re;
                re[odd] = re[even] - t_re;
                im[odd] = im[even] - t_im;
                re[even] += t_re;
                im[even] += t_im;
                let next_re = w_re * step_re - w_im * step_im;
                w_im = w_re * step_im + w_im * step_re;
                w_re = next_re;
            }
        }
        len <<= 1;
    }
}

/// Power spectrum (|X[k]|^2) of a real frame, zero-padded to `n_fft`.
///
/// Returns `n_fft / 2 + 1` bins.
pub fn power_spectrum(frame: &[f32], n_fft: usize) -> Vec<f32> {
    debug_assert!(frame.len() <= n_fft);

    let mut re = vec![0.0f32; n_fft];
    let mut im = vec![0.0f32; n_fft];
    re[..frame.len()].copy_from_slice(frame);

    fft_in_place(&mut re, &mut im);

    (0..n_fft / 2 + 1)
        .map(|k| re[k] * re[k] + im[k] * im[k])
        .collect()
}

/// Hz -> mel (HTK formula)
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Mel -> Hz (HTK formula)
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular mel filterbank.
///
/// Each of the `n_filters` rows spans `n_fft / 2 + 1` power-spectrum bins.
pub fn mel_filterbank(
    n_filters: usize,
    n_fft: usize,
    sample_rate: u32,
    fmin: f32,
    fmax: f32,
) -> Vec<Vec<f32>> {
    let n_bins = n_fft / 2 + 1;
    let mel_lo = hz_to_mel(fmin);
    let mel_hi = hz_to_mel(fmax);

    // n_filters + 2 equally spaced points on the mel scale, mapped back to
    // FFT bin indices
    let bin_of = |mel: f32| -> f32 {
        let hz = mel_to_hz(mel);
        hz * n_fft as f32 / sample_rate as f32
    };
    let points: Vec<f32> = (0..n_filters + 2)
        .map(|i| {
            let mel = mel_lo + (mel_hi - mel_lo) * i as f32 / (n_filters + 1) as f32;
            bin_of(mel)
        })
        .collect();

    let mut bank = vec![vec![0.0f32; n_bins]; n_filters];
    for (m, row) in bank.iter_mut().enumerate() {
        let left = points[m];
        let center = points[m + 1];
        let right = points[m + 2];
        for (k, weight) in row.iter_mut().enumerate() {
            let bin = k as f32;
            if bin > left && bin < center {
                *weight = (bin - left) / (center - left).max(f32::EPSILON);
            } else if (bin - center).abs() < f32::EPSILON {
                *weight = 1.0;
            } else if bin > center && bin < right {
                *weight = (right - bin) / (right - center).max(f32::EPSILON);
            }
        }
    }
    bank
}

/// Orthonormal DCT-II basis: `n_out` rows over `n_in` inputs
pub fn dct_ii_basis(n_out: usize, n_in: usize) -> Vec<Vec<f32>> {
    let mut basis = vec![vec![0.0f32; n_in]; n_out];
    for (k, row) in basis.iter_mut().enumerate() {
        let scale = if k == 0 {
            (1.0 / n_in as f32).sqrt()
        } else {
            (2.0 / n_in as f32).sqrt()
        };
        for (n, value) in row.iter_mut().enumerate() {
            *value = scale * (PI / n_in as f32 * (n as f32 + 0.5) * k as f32).cos();
        }
    }
    basis
}
