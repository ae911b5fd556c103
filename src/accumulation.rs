//! Conversational accumulation model
//!
//! A conversation does not send its full history cap on every turn: it
//! starts empty and ramps up as turns exchange tokens. These helpers turn
//! flat token counts into the graduated averages and per-turn values the
//! cost formulas consume. Pure token-count transformers, no cost semantics.

/// Tokens added to the history by one exchange
///
/// One model turn plus an estimated user turn at 25% of the output size.
pub fn tokens_per_exchange(output_tokens: u64) -> u64 {
    (output_tokens as f64 * 1.25).round() as u64
}

/// History size visible at the start of turn `t` (1-based)
///
/// Turn 1 has zero history; later turns carry the accumulated exchanges,
/// clamped at the cap.
pub fn history_at_turn(turn: u64, output_tokens: u64, history_cap: u64) -> u64 {
    if turn <= 1 {
        return 0;
    }
    ((turn - 1) * tokens_per_exchange(output_tokens)).min(history_cap)
}

/// Average history tokens per turn over a whole conversation
///
/// Closed form of the arithmetic ramp from zero up to the cap, plus the flat
/// tail once the cap is reached. Degenerate inputs (no turns, no cap, or an
/// exchange size of zero) yield zero rather than dividing by zero.
pub fn avg_history_tokens(history_cap: u64, turns: u64, output_tokens: u64) -> f64 {
    if turns == 0 || history_cap == 0 {
        return 0.0;
    }
    let tpe = tokens_per_exchange(output_tokens);
    if tpe == 0 {
        return 0.0;
    }

    let ramp_turns = history_cap.div_ceil(tpe).min(turns);
    let ramp_sum = tpe as f64 * ramp_turns as f64 * (ramp_turns as f64 - 1.0) / 2.0;
    let capped_sum = history_cap as f64 * turns.saturating_sub(ramp_turns) as f64;

    (ramp_sum + capped_sum) / turns as f64
}

/// Average per-request submission size
///
/// A progressive submission grows linearly from empty to full across the
/// conversation, so its average over the run is half the final size. A
/// single-turn run sends the full submission.
pub fn effective_submission_tokens(
    submission_tokens: u64,
    turns: u64,
    progressive: bool,
) -> f64 {
    if progressive && turns > 1 {
        submission_tokens as f64 / 2.0
    } else {
        submission_tokens as f64
    }
}

/// Progressive submission size at turn `t` (1-based): zero at turn 1,
/// full size at the final turn
pub fn submission_at_turn(turn: u64, turns: u64, submission_tokens: u64) -> u64 {
    if turns <= 1 {
        return submission_tokens;
    }
    let turn = turn.min(turns);
    let fraction = (turn.saturating_sub(1)) as f64 / (turns - 1) as f64;
    (fraction * submission_tokens as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_per_exchange_rounds() {
        assert_eq!(tokens_per_exchange(1000), 1250);
        assert_eq!(tokens_per_exchange(0), 0);
        assert_eq!(tokens_per_exchange(2), 3); // 2.5 rounds up
    }

    #[test]
    fn test_history_at_turn() {
        assert_eq!(history_at_turn(1, 1000, 10000), 0);
        assert_eq!(history_at_turn(2, 1000, 10000), 1250);
        assert_eq!(history_at_turn(5, 1000, 10000), 5000);
        // Clamped at the cap
        assert_eq!(history_at_turn(50, 1000, 10000), 10000);
    }

    #[test]
    fn test_avg_history_single_turn_is_zero() {
        assert_eq!(avg_history_tokens(10000, 1, 1000), 0.0);
    }

    #[test]
    fn test_avg_history_degenerate_inputs() {
        assert_eq!(avg_history_tokens(0, 10, 1000), 0.0);
        assert_eq!(avg_history_tokens(10000, 0, 1000), 0.0);
        assert_eq!(avg_history_tokens(10000, 10, 0), 0.0);
    }

    #[test]
    fn test_avg_history_pure_ramp() {
        // Cap large enough that the ramp never completes: the average is the
        // plain arithmetic mean of 0, tpe, 2*tpe, ... (turns-1)*tpe.
        let turns = 8;
        let tpe = tokens_per_exchange(1000) as f64;
        let avg = avg_history_tokens(1_000_000, turns, 1000);
        assert_eq!(avg, tpe * (turns as f64 - 1.0) / 2.0);
    }

    #[test]
    fn test_avg_history_capped_tail() {
        // cap 2500, tpe 1250: ramp completes in 2 turns, then flat at cap.
        // Histories per turn: 0, 1250, 2500, 2500 -> avg 1562.5
        let avg = avg_history_tokens(2500, 4, 1000);
        assert_eq!(avg, 1562.5);
    }

    #[test]
    fn test_submission_at_turn_ramp() {
        assert_eq!(submission_at_turn(1, 5, 2000), 0);
        assert_eq!(submission_at_turn(3, 5, 2000), 1000);
        assert_eq!(submission_at_turn(5, 5, 2000), 2000);
        // Single-turn run sends everything
        assert_eq!(submission_at_turn(1, 1, 2000), 2000);
    }
}
