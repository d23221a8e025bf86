/// PARAM_FILT_B1 is the `VarMap` name of the lower-cutoff parameter vector.
pub const PARAM_FILT_B1: &str = "filt_b1";

/// PARAM_FILT_BAND is the `VarMap` name of the bandwidth parameter vector.
pub const PARAM_FILT_BAND: &str = "filt_band";

/// DEFAULT_MIN_FREQ_HZ is the floor added to every lower cutoff.
pub const DEFAULT_MIN_FREQ_HZ: f64 = 50.0;

/// DEFAULT_MIN_BAND_HZ is the floor added to every bandwidth.
pub const DEFAULT_MIN_BAND_HZ: f64 = 50.0;

/// DEFAULT_FMIN_MEL is the first point of the mel-spaced initialization grid.
pub const DEFAULT_FMIN_MEL: f64 = 80.0;

/// DEFAULT_N_FILT is the filter count of the classic SincNet front-end.
pub const DEFAULT_N_FILT: usize = 80;

/// DEFAULT_FILT_DIM is the kernel length of the classic SincNet front-end.
pub const DEFAULT_FILT_DIM: usize = 251;

/// DEFAULT_SAMPLE_RATE is the sample rate (Hz) assumed when none is configured.
pub const DEFAULT_SAMPLE_RATE: f64 = 16_000.0;

/// LOWEST_CUTOFF_HZ pins the lower edge of the first filter at init time.
pub const LOWEST_CUTOFF_HZ: f64 = 30.0;

/// NYQUIST_MARGIN_HZ keeps the upper edge of the last filter below `fs / 2` at init time.
pub const NYQUIST_MARGIN_HZ: f64 = 100.0;

// HTK mel scale
pub(crate) const MEL_SCALE: f64 = 2595.0;
pub(crate) const MEL_BREAK_HZ: f64 = 700.0;
