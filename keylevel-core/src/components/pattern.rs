//! Engulfing-pattern detection on the two most recent entry candles.
//!
//! Bullish: prior candle bearish, current bullish, and the current real body
//! strictly contains the prior one (curr.close > prev.open, curr.open <
//! prev.close). Bearish is the mirror. The trend label gates which branches
//! run: Up → bullish only, Down → bearish only, Indeterminate → both, bullish
//! first. The colour conditions make the two branches mutually exclusive.

use crate::domain::{Candle, Direction, PatternResult, TrendLabel};

pub fn detect_engulfing(prev: &Candle, curr: &Candle, trend: TrendLabel) -> Option<PatternResult> {
    let result = |direction| PatternResult {
        direction,
        prev: *prev,
        curr: *curr,
    };

    if matches!(trend, TrendLabel::Up | TrendLabel::Indeterminate) && is_bullish_engulfing(prev, curr)
    {
        return Some(result(Direction::Bullish));
    }

    if matches!(trend, TrendLabel::Down | TrendLabel::Indeterminate)
        && is_bearish_engulfing(prev, curr)
    {
        return Some(result(Direction::Bearish));
    }

    None
}

/// Engulfing check on the last two candles of `candles`.
/// Fewer than two candles is `None`.
pub fn detect_engulfing_at_end(candles: &[Candle], trend: TrendLabel) -> Option<PatternResult> {
    match candles {
        [.., prev, curr] => detect_engulfing(prev, curr, trend),
        _ => None,
    }
}

fn is_bullish_engulfing(prev: &Candle, curr: &Candle) -> bool {
    prev.is_bearish() && curr.is_bullish() && curr.close > prev.open && curr.open < prev.close
}

fn is_bearish_engulfing(prev: &Candle, curr: &Candle) -> bool {
    prev.is_bullish() && curr.is_bearish() && curr.close < prev.open && curr.open > prev.close
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn body(i: i64, open: f64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(4 * i),
            open,
            high: open.max(close) + 0.5,
            low: open.min(close) - 0.5,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn bullish_engulfing_in_uptrend() {
        let prev = body(0, 10.0, 8.0);
        let curr = body(1, 7.0, 11.0);
        let result = detect_engulfing(&prev, &curr, TrendLabel::Up).unwrap();
        assert_eq!(result.direction, Direction::Bullish);
        assert_eq!(result.prev, prev);
        assert_eq!(result.curr, curr);
    }

    #[test]
    fn bearish_engulfing_in_downtrend() {
        let prev = body(0, 8.0, 10.0);
        let curr = body(1, 11.0, 7.0);
        let result = detect_engulfing(&prev, &curr, TrendLabel::Down).unwrap();
        assert_eq!(result.direction, Direction::Bearish);
    }

    #[test]
    fn partial_overlap_is_not_engulfing() {
        let prev = body(0, 10.0, 8.0);
        let curr = body(1, 9.0, 11.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Up), None);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Indeterminate), None);
    }

    #[test]
    fn trend_gates_branches() {
        let prev = body(0, 10.0, 8.0);
        let curr = body(1, 7.0, 11.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Down), None);

        let prev = body(0, 8.0, 10.0);
        let curr = body(1, 11.0, 7.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Up), None);
    }

    #[test]
    fn indeterminate_evaluates_both_branches() {
        let bull = detect_engulfing(&body(0, 10.0, 8.0), &body(1, 7.0, 11.0), TrendLabel::Indeterminate);
        assert_eq!(bull.map(|p| p.direction), Some(Direction::Bullish));

        let bear = detect_engulfing(&body(0, 8.0, 10.0), &body(1, 11.0, 7.0), TrendLabel::Indeterminate);
        assert_eq!(bear.map(|p| p.direction), Some(Direction::Bearish));
    }

    #[test]
    fn equal_body_edges_do_not_engulf() {
        // curr.close == prev.open: containment must be strict.
        let prev = body(0, 10.0, 8.0);
        let curr = body(1, 7.0, 10.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Up), None);
    }

    #[test]
    fn same_colour_is_not_engulfing() {
        let prev = body(0, 8.0, 10.0);
        let curr = body(1, 7.0, 11.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Indeterminate), None);
    }

    #[test]
    fn doji_prior_candle_is_not_engulfed() {
        let prev = body(0, 9.0, 9.0);
        let curr = body(1, 7.0, 11.0);
        assert_eq!(detect_engulfing(&prev, &curr, TrendLabel::Up), None);
    }

    #[test]
    fn at_end_uses_last_two_candles() {
        let candles = vec![body(0, 20.0, 21.0), body(1, 10.0, 8.0), body(2, 7.0, 11.0)];
        let result = detect_engulfing_at_end(&candles, TrendLabel::Up).unwrap();
        assert_eq!(result.prev, candles[1]);
        assert_eq!(result.curr, candles[2]);
    }

    #[test]
    fn at_end_needs_two_candles() {
        assert_eq!(detect_engulfing_at_end(&[body(0, 10.0, 8.0)], TrendLabel::Up), None);
        assert_eq!(detect_engulfing_at_end(&[], TrendLabel::Indeterminate), None);
    }
}
