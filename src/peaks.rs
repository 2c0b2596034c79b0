use std::collections::BTreeSet;

use crate::config::PeakPickingConfig;
use crate::error::Result;
use crate::spectrogram::Spectrogram;

/// A set of `(freq_bin, time_bin)` coordinates, unique and in-bounds, with
/// the same shape as the source spectrogram. `BTreeSet` gives set semantics
/// (duplicates from overlapping windows collapse for free) and a row-major
/// iteration order for the anchor pass over pairs.
pub type PeakMap = BTreeSet<(usize, usize)>;

/// Reduces a magnitude spectrogram to a sparse set of local maxima on a
/// regular window grid.
pub fn pick_peaks(spectrogram: &Spectrogram, config: &PeakPickingConfig) -> Result<PeakMap> {
    config.validate()?;

    let mut peaks = PeakMap::new();

    let kappa = config.kappa;
    let tau = config.tau;
    let hop_kappa = config.hop_kappa;
    let hop_tau = config.hop_tau;

    let rows = spectrogram.rows();
    let cols = spectrogram.cols();

    if rows < 2 * kappa || cols < 2 * tau {
        // Spectrogram smaller than one window: zero peaks, not an error.
        return Ok(peaks);
    }

    let n_freq_steps = (rows - 2 * kappa) / hop_kappa;
    let n_time_steps = (cols - 2 * tau) / hop_tau;

    for k in 0..n_freq_steps {
        let row_lo = k * hop_kappa;
        let row_hi = row_lo + 2 * kappa;

        for n in 0..n_time_steps {
            let col_lo = n * hop_tau;
            let col_hi = col_lo + 2 * tau;

            let peak = spectrogram.argmax_in_window(row_lo, row_hi, col_lo, col_hi);
            peaks.insert(peak);
        }
    }

    Ok(peaks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kappa: usize, tau: usize, hop_kappa: usize, hop_tau: usize) -> PeakPickingConfig {
        PeakPickingConfig {
            kappa,
            tau,
            hop_kappa,
            hop_tau,
        }
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let spec = Spectrogram::zeros(10, 10);
        assert!(pick_peaks(&spec, &config(0, 1, 1, 1)).is_err());
        assert!(pick_peaks(&spec, &config(1, 0, 1, 1)).is_err());
        assert!(pick_peaks(&spec, &config(1, 1, 0, 1)).is_err());
        assert!(pick_peaks(&spec, &config(1, 1, 1, 0)).is_err());
    }

    #[test]
    fn undersized_spectrogram_yields_no_peaks() {
        let spec = Spectrogram::zeros(2, 2);
        let peaks = pick_peaks(&spec, &config(4, 4, 1, 1)).unwrap();
        assert!(peaks.is_empty());
    }

    #[test]
    fn idempotent_peak_picking() {
        let mut data = vec![0.0; 10 * 10];
        for (i, v) in data.iter_mut().enumerate() {
            *v = (i % 7) as f32;
        }
        let spec = Spectrogram::new(10, 10, data);
        let cfg = config(1, 1, 1, 1);
        let first = pick_peaks(&spec, &cfg).unwrap();
        let second = pick_peaks(&spec, &cfg).unwrap();
        assert_eq!(first, second);
    }

    /// kappa=tau=1, hop_kappa=hop_tau=1 on a 10x10 spectrogram yields
    /// exactly (10-2)*(10-2) = 64 peaks.
    #[test]
    fn unit_stride_windows_cover_every_interior_cell() {
        let mut data = vec![0.0; 10 * 10];
        for (i, v) in data.iter_mut().enumerate() {
            *v = i as f32;
        }
        let spec = Spectrogram::new(10, 10, data);
        let peaks = pick_peaks(&spec, &config(1, 1, 1, 1)).unwrap();
        assert_eq!(peaks.len(), 64);
    }

    #[test]
    fn peaks_are_in_bounds() {
        let mut data = vec![0.0; 20 * 20];
        for (i, v) in data.iter_mut().enumerate() {
            *v = ((i * 37) % 101) as f32;
        }
        let spec = Spectrogram::new(20, 20, data);
        let peaks = pick_peaks(&spec, &config(3, 2, 5, 3)).unwrap();
        for (r, c) in &peaks {
            assert!(*r < 20);
            assert!(*c < 20);
        }
    }
}
