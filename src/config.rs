use crate::error::{FingerprintError, Result};

/// Parameters controlling the peak-picking window grid.
///
/// `kappa`/`tau` are the half-height/half-width of each window; `hop_kappa`/
/// `hop_tau` are the stride between windows along frequency/time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeakPickingConfig {
    pub kappa: usize,
    pub tau: usize,
    pub hop_kappa: usize,
    pub hop_tau: usize,
}

impl PeakPickingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kappa == 0 || self.tau == 0 || self.hop_kappa == 0 || self.hop_tau == 0 {
            return Err(FingerprintError::InvalidParameters(
                "kappa, tau, hop_kappa and hop_tau must all be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PeakPickingConfig {
    fn default() -> Self {
        PeakPickingConfig {
            kappa: 32,
            tau: 16,
            hop_kappa: 64,
            hop_tau: 4,
        }
    }
}

/// Parameters controlling the forward target zone used for pair hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairHashingConfig {
    pub target_time_offset: usize,
    pub target_time_width: usize,
    pub target_freq_height: usize,
}

impl PairHashingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target_time_offset < 1 {
            return Err(FingerprintError::InvalidParameters(
                "target_time_offset must be >= 1".into(),
            ));
        }
        if self.target_time_width == 0 || self.target_freq_height == 0 {
            return Err(FingerprintError::InvalidParameters(
                "target_time_width and target_freq_height must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PairHashingConfig {
    fn default() -> Self {
        PairHashingConfig {
            target_time_offset: 3,
            target_time_width: 196,
            target_freq_height: 220,
        }
    }
}

/// Bundles the seven positive-integer parameters that flow through the whole
/// pipeline. There are no environment variables; configuration always flows
/// through explicit function arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FingerprintConfig {
    pub peak_picking: PeakPickingConfig,
    pub pair_hashing: PairHashingConfig,
}

impl FingerprintConfig {
    pub fn validate(&self) -> Result<()> {
        self.peak_picking.validate()?;
        self.pair_hashing.validate()?;
        Ok(())
    }
}
