//! Stochastic oscillator (%K and %D).
//!
//! Produces two series (exposed as separate Indicator instances):
//! - %K: 100 × (close − lowest low) / (highest high − lowest low) over `k_period`
//! - %D: simple mean of the last `d_period` %K values
//!
//! A window with zero high-low range reads %K = 50.
//!
//! Lookback: %K = k_period - 1, %D = k_period + d_period - 2.

use crate::components::indicator::Indicator;
use crate::domain::Candle;

use super::sma::rolling_mean;

const FLAT_RANGE_K: f64 = 50.0;

/// Which line of the oscillator to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    pub fn k(k_period: usize) -> Self {
        assert!(k_period >= 1, "%K period must be >= 1");
        Self {
            k_period,
            d_period: 1,
            line: StochasticLine::K,
            name: format!("stoch_k_{k_period}"),
        }
    }

    pub fn d(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1, "%K period must be >= 1");
        assert!(d_period >= 1, "%D period must be >= 1");
        Self {
            k_period,
            d_period,
            line: StochasticLine::D,
            name: format!("stoch_d_{k_period}_{d_period}"),
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.k_period - 1,
            StochasticLine::D => self.k_period + self.d_period - 2,
        }
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let k = percent_k(candles, self.k_period);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => rolling_mean(&k, self.d_period),
        }
    }
}

/// Both lines at once, sharing the %K pass.
pub fn stochastic_lines(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
) -> (Vec<f64>, Vec<f64>) {
    let k = percent_k(candles, k_period);
    let d = rolling_mean(&k, d_period);
    (k, d)
}

fn percent_k(candles: &[Candle], period: usize) -> Vec<f64> {
    let n = candles.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &candles[(i + 1 - period)..=i];
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut has_nan = false;
        for candle in window {
            if candle.high.is_nan() || candle.low.is_nan() {
                has_nan = true;
                break;
            }
            highest = highest.max(candle.high);
            lowest = lowest.min(candle.low);
        }
        let close = candles[i].close;
        if has_nan || close.is_nan() {
            continue;
        }

        let range = highest - lowest;
        result[i] = if range > 0.0 {
            100.0 * (close - lowest) / range
        } else {
            FLAT_RANGE_K
        };
    }

    result
}
