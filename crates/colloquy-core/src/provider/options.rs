//! Sampling and length controls shared by every provider.
//!
//! All fields are optional; `None` leaves the provider default in place.
//! The ranges enforced by [`GenerationOptions::validate`] are the ones the
//! OpenAI-compatible chat APIs document.
//!
//! ```rust
//! use colloquy_core::provider::GenerationOptions;
//!
//! let precise = GenerationOptions::new()
//!     .with_temperature(0.7)
//!     .with_top_p(0.9)
//!     .with_max_tokens(500)
//!     .with_stop(["\n\n", "Summary:"]);
//!
//! assert!(precise.validate().is_ok());
//! assert!(GenerationOptions::new().with_temperature(3.0).validate().is_err());
//! ```
use crate::error::{ColloquyError, Result};

/// Upper bound on stop sequences accepted by the API.
pub const MAX_STOP_SEQUENCES: usize = 16;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// Randomness, `0.0..=2.0`.
    pub temperature: Option<f64>,
    /// Nucleus sampling mass, `0.0..=1.0`.
    pub top_p: Option<f64>,
    /// Hard limit on generated tokens, at least 1.
    pub max_tokens: Option<u32>,
    /// Generation halts before emitting any of these.
    pub stop: Option<Vec<String>>,
    /// `-2.0..=2.0`; positive values favour new topics.
    pub presence_penalty: Option<f64>,
    /// `-2.0..=2.0`; positive values discourage verbatim repetition.
    pub frequency_penalty: Option<f64>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stop<I, S>(mut self, stop: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop = Some(stop.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Check every set option against its documented range.
    ///
    /// # Errors
    ///
    /// [`ColloquyError::InvalidRequest`] naming the first offending option.
    pub fn validate(&self) -> Result<()> {
        check_range("temperature", self.temperature, 0.0, 2.0)?;
        check_range("top_p", self.top_p, 0.0, 1.0)?;
        check_range("presence_penalty", self.presence_penalty, -2.0, 2.0)?;
        check_range("frequency_penalty", self.frequency_penalty, -2.0, 2.0)?;

        if self.max_tokens == Some(0) {
            return Err(ColloquyError::InvalidRequest(
                "max_tokens must be at least 1".into(),
            ));
        }

        if let Some(stop) = &self.stop {
            if stop.len() > MAX_STOP_SEQUENCES {
                return Err(ColloquyError::InvalidRequest(format!(
                    "at most {MAX_STOP_SEQUENCES} stop sequences are allowed, got {}",
                    stop.len()
                )));
            }
            if stop.iter().any(String::is_empty) {
                return Err(ColloquyError::InvalidRequest(
                    "stop sequences must not be empty".into(),
                ));
            }
        }

        Ok(())
    }
}

fn check_range(name: &str, value: Option<f64>, min: f64, max: f64) -> Result<()> {
    match value {
        // NaN fails both comparisons and is rejected too.
        Some(v) if !(min..=max).contains(&v) => Err(ColloquyError::InvalidRequest(format!(
            "{name} must be within [{min}, {max}], got {v}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GenerationOptions::default().validate().is_ok());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let options = GenerationOptions::new()
            .with_temperature(2.0)
            .with_top_p(0.0)
            .with_presence_penalty(-2.0)
            .with_frequency_penalty(2.0)
            .with_max_tokens(1);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_named() {
        let err = GenerationOptions::new()
            .with_top_p(1.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("top_p"));

        let err = GenerationOptions::new()
            .with_frequency_penalty(-2.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("frequency_penalty"));

        assert!(
            GenerationOptions::new()
                .with_temperature(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        assert!(GenerationOptions::new().with_max_tokens(0).validate().is_err());
    }

    #[test]
    fn stop_sequences_are_checked() {
        let too_many = GenerationOptions::new().with_stop((0..17).map(|i| i.to_string()));
        assert!(too_many.validate().is_err());

        let empty = GenerationOptions::new().with_stop([""]);
        assert!(empty.validate().is_err());
    }
}
