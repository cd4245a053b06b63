//! Trend classification against a simple moving average of closes.
//!
//! Up iff the last close is strictly above the MA of the last `window`
//! closes; equality resolves to Down. A series shorter than `window` is
//! Indeterminate.

use crate::components::indicator::Indicator;
use crate::domain::{Candle, TrendLabel, TrendReading};
use crate::indicators::Sma;

/// Trend label and the moving average behind it.
///
/// A zero `window` has no average and reads Indeterminate.
pub fn trend_reading(candles: &[Candle], window: usize) -> TrendReading {
    let indeterminate = TrendReading {
        label: TrendLabel::Indeterminate,
        moving_average: None,
    };
    if window == 0 || candles.len() < window {
        return indeterminate;
    }
    let (Some(last), Some(ma)) = (candles.last(), Sma::new(window).latest(candles)) else {
        return indeterminate;
    };

    let label = if last.close > ma {
        TrendLabel::Up
    } else {
        TrendLabel::Down
    };
    TrendReading {
        label,
        moving_average: Some(ma),
    }
}

/// Trend label only.
pub fn classify_trend(candles: &[Candle], window: usize) -> TrendLabel {
    trend_reading(candles, window).label
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn constant_closes_resolve_down() {
        let candles = make_candles(&[100.0; 10]);
        let reading = trend_reading(&candles, 5);
        assert_eq!(reading.label, TrendLabel::Down);
        assert_eq!(reading.moving_average, Some(100.0));
    }

    #[test]
    fn rise_above_flat_history_is_up() {
        let mut closes = vec![100.0; 9];
        closes.push(101.0);
        assert_eq!(classify_trend(&make_candles(&closes), 5), TrendLabel::Up);
    }

    #[test]
    fn drop_below_average_is_down() {
        let mut closes = vec![100.0; 9];
        closes.push(99.0);
        assert_eq!(classify_trend(&make_candles(&closes), 5), TrendLabel::Down);
    }

    #[test]
    fn short_series_is_indeterminate() {
        let candles = make_candles(&[100.0, 101.0, 102.0]);
        let reading = trend_reading(&candles, 50);
        assert_eq!(reading.label, TrendLabel::Indeterminate);
        assert_eq!(reading.moving_average, None);
    }

    #[test]
    fn window_equal_to_length_is_classified() {
        let candles = make_candles(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let reading = trend_reading(&candles, 5);
        assert_eq!(reading.label, TrendLabel::Up);
        assert_eq!(reading.moving_average, Some(12.0));
    }

    #[test]
    fn only_last_window_counts() {
        // Old history far above; last five are flat at 50 then a tick up.
        let mut closes = vec![500.0; 20];
        closes.extend([50.0, 50.0, 50.0, 50.0, 51.0]);
        assert_eq!(classify_trend(&make_candles(&closes), 5), TrendLabel::Up);
    }

    #[test]
    fn empty_series_is_indeterminate() {
        assert_eq!(classify_trend(&[], 1), TrendLabel::Indeterminate);
    }

    #[test]
    fn zero_window_is_indeterminate() {
        assert_eq!(classify_trend(&[], 0), TrendLabel::Indeterminate);
        let reading = trend_reading(&make_candles(&[100.0, 101.0]), 0);
        assert_eq!(reading.label, TrendLabel::Indeterminate);
        assert_eq!(reading.moving_average, None);
    }
}
