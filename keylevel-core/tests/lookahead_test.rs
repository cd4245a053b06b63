//! Look-ahead contamination tests for the indicators.
//!
//! Invariant: no indicator value at candle t may depend on price data from
//! candle t+1 or later.
//!
//! Method: compute on a truncated series (candles 0..100) and the full series
//! (candles 0..200). Assert candles 0..100 are identical between both runs.

use chrono::{Duration, TimeZone, Utc};
use keylevel_core::components::indicator::Indicator;
use keylevel_core::domain::Candle;
use keylevel_core::indicators::*;

/// Generate N candles of synthetic OHLCV data with realistic variation.
fn make_test_candles(n: usize) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let mut candles = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05;
        price += change;
        price = price.max(10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        candles.push(Candle {
            timestamp: base + Duration::hours(4 * i as i64),
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 1000.0 + i as f64 * 100.0,
        });
    }

    candles
}

fn assert_no_lookahead(indicator: &dyn Indicator, full: &[Candle], truncated_len: usize) {
    let truncated_result = indicator.compute(&full[..truncated_len]);
    let full_result = indicator.compute(full);

    assert_eq!(truncated_result.len(), truncated_len, "{}", indicator.name());
    assert_eq!(full_result.len(), full.len(), "{}", indicator.name());

    for i in 0..truncated_len {
        let t = truncated_result[i];
        let f = full_result[i];
        if t.is_nan() && f.is_nan() {
            continue;
        }
        assert!(
            !t.is_nan() && !f.is_nan(),
            "{}: NaN mismatch at candle {i} (truncated={t}, full={f})",
            indicator.name()
        );
        assert!(
            (t - f).abs() < 1e-10,
            "{}: look-ahead contamination at candle {i}: truncated={t}, full={f}",
            indicator.name()
        );
    }
}

#[test]
fn lookahead_sma() {
    let candles = make_test_candles(200);
    assert_no_lookahead(&Sma::new(10), &candles, 100);
    assert_no_lookahead(&Sma::new(50), &candles, 100);
}

#[test]
fn lookahead_stochastic() {
    let candles = make_test_candles(200);
    assert_no_lookahead(&Stochastic::k(14), &candles, 100);
    assert_no_lookahead(&Stochastic::d(14, 3), &candles, 100);
    assert_no_lookahead(&Stochastic::k(5), &candles, 100);
    assert_no_lookahead(&Stochastic::d(5, 5), &candles, 100);
}

#[test]
fn warmup_matches_lookback() {
    let candles = make_test_candles(60);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(20)),
        Box::new(Stochastic::k(14)),
        Box::new(Stochastic::d(14, 3)),
    ];
    for ind in &indicators {
        let values = ind.compute(&candles);
        let lookback = ind.lookback();
        assert!(values[..lookback].iter().all(|v| v.is_nan()), "{}", ind.name());
        assert!(values[lookback..].iter().all(|v| v.is_finite()), "{}", ind.name());
    }
}
