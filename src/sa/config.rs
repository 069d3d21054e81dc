//! SA configuration and the geometric cooling schedule.

/// Configuration for the Simulated Annealing algorithm.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_alpha` after every `inner_loop_count` iterations. The number of
/// temperature levels is fixed by [`SaConfig::outer_iterations`].
///
/// # Examples
///
/// ```
/// use u_postman::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_final_temperature(1.0)
///     .with_cooling_alpha(0.92)
///     .with_inner_loop_count(5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.outer_iterations(), 56);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// The run stops once the temperature drops to this value or below.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = alpha * T_k`.
    pub cooling_alpha: f64,

    /// Number of neighbour evaluations at each temperature level.
    pub inner_loop_count: u32,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            final_temperature: 1.0,
            cooling_alpha: 0.92,
            inner_loop_count: 10,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_alpha(mut self, alpha: f64) -> Self {
        self.cooling_alpha = alpha;
        self
    }

    pub fn with_inner_loop_count(mut self, n: u32) -> Self {
        self.inner_loop_count = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.final_temperature > 0.0) {
            return Err("final_temperature must be positive".into());
        }
        if self.final_temperature >= self.initial_temperature {
            return Err("final_temperature must be less than initial_temperature".into());
        }
        if !(self.cooling_alpha > 0.0 && self.cooling_alpha < 1.0) {
            return Err(format!(
                "cooling_alpha must be in (0, 1), got {}",
                self.cooling_alpha
            ));
        }
        if self.inner_loop_count == 0 {
            return Err("inner_loop_count must be at least 1".into());
        }
        Ok(())
    }

    /// Number of temperature levels the run will visit:
    /// `ceil(ln(final / initial) / ln(alpha))`.
    pub fn outer_iterations(&self) -> usize {
        let steps = (self.final_temperature / self.initial_temperature).ln()
            / self.cooling_alpha.ln();
        steps.ceil().max(0.0) as usize
    }

    /// Applies one cooling step.
    pub fn cool(&self, temperature: f64) -> f64 {
        temperature * self.cooling_alpha
    }
}
