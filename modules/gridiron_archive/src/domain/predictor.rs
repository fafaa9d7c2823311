//! Game predictor
//!
//! Pure function over two team-season snapshots. Each side's estimate
//! averages what its offense tends to produce against the opposing defense
//! with what the opposing defense tends to concede, scaled by the
//! league-relative factors.

use crate::contract::TeamSeason;
use rust_decimal::{Decimal, RoundingStrategy};

/// Predictor output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamePrediction {
    /// Estimated final score, one fractional digit
    Estimate {
        guest_score: Decimal,
        host_score: Decimal,
    },
    /// Either team-season snapshot was missing
    Unknown,
}

/// Estimate the score of an unplayed matchup
///
/// Missing snapshots yield [`GamePrediction::Unknown`] rather than an error.
/// Rounding is half-away-from-zero to one decimal place.
pub fn predict(guest: Option<&TeamSeason>, host: Option<&TeamSeason>) -> GamePrediction {
    let (guest, host) = match (guest, host) {
        (Some(g), Some(h)) => (g, h),
        _ => return GamePrediction::Unknown,
    };

    let guest_score = side_estimate(
        guest.offensive_factor,
        host.defensive_average,
        host.defensive_factor,
        guest.offensive_average,
    );
    let host_score = side_estimate(
        host.offensive_factor,
        guest.defensive_average,
        guest.defensive_factor,
        host.offensive_average,
    );

    GamePrediction::Estimate {
        guest_score,
        host_score,
    }
}

fn side_estimate(
    own_offensive_factor: Option<Decimal>,
    opponent_defensive_average: Option<Decimal>,
    opponent_defensive_factor: Option<Decimal>,
    own_offensive_average: Option<Decimal>,
) -> Decimal {
    let of = own_offensive_factor.unwrap_or_default();
    let da = opponent_defensive_average.unwrap_or_default();
    let df = opponent_defensive_factor.unwrap_or_default();
    let oa = own_offensive_average.unwrap_or_default();

    ((of * da + df * oa) / Decimal::from(2))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}
