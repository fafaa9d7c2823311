//! Contract models for the football archive
//!
//! Pure domain types plus the small behaviors the game processing pipeline
//! relies on: winner/loser resolution, tie detection and the aggregate
//! counter helpers on [`TeamSeason`] and [`LeagueSeason`].

use rust_decimal::{Decimal, RoundingStrategy};

/// One calendar year of play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    /// Unique year, 1920 or later
    pub year: i32,
    pub num_of_weeks_scheduled: i32,
    pub num_of_weeks_completed: i32,
}

/// Top-level organizational container, scoped to a range of seasons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    /// Unique abbreviation, at most 5 characters
    pub short_name: String,
    /// Unique full name, at most 50 characters
    pub long_name: String,
    pub first_season_year: i32,
    /// None while the league is still active
    pub last_season_year: Option<i32>,
}

/// Conference inside a league
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    pub short_name: String,
    pub long_name: String,
    pub league_name: String,
    pub first_season_year: i32,
    pub last_season_year: Option<i32>,
}

/// Division inside a league, optionally inside a conference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub name: String,
    pub league_name: String,
    pub conference_name: Option<String>,
    pub first_season_year: i32,
    pub last_season_year: Option<i32>,
}

/// A franchise, identified by its unique name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
}

/// A single played matchup between a guest and a host team
///
/// The winner/loser fields are derived: all four are populated when the
/// scores differ and all four are `None` on a tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub season_year: i32,
    pub week: i32,
    pub guest_name: String,
    pub guest_score: i32,
    pub host_name: String,
    pub host_score: i32,
    pub winner_name: Option<String>,
    pub winner_score: Option<i32>,
    pub loser_name: Option<String>,
    pub loser_score: Option<i32>,
    pub is_playoff: bool,
    pub notes: Option<String>,
}

impl Game {
    /// A game is a tie exactly when the two scores are equal
    pub fn is_tie(&self) -> bool {
        self.guest_score == self.host_score
    }

    /// Populate the winner/loser fields from the scores
    ///
    /// Host wins when `host_score > guest_score`, guest wins on the reverse,
    /// and on a tie all four derived fields are cleared.
    pub fn decide_winner_and_loser(&mut self) {
        if self.host_score > self.guest_score {
            self.winner_name = Some(self.host_name.clone());
            self.winner_score = Some(self.host_score);
            self.loser_name = Some(self.guest_name.clone());
            self.loser_score = Some(self.guest_score);
        } else if self.guest_score > self.host_score {
            self.winner_name = Some(self.guest_name.clone());
            self.winner_score = Some(self.guest_score);
            self.loser_name = Some(self.host_name.clone());
            self.loser_score = Some(self.host_score);
        } else {
            self.winner_name = None;
            self.winner_score = None;
            self.loser_name = None;
            self.loser_score = None;
        }
    }
}

/// Form-shaped game input as it arrives from the HTTP surface
///
/// Required fields are `Option` so that absence can be reported by parameter
/// name; the literal value `0` is a present value for the numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameForm {
    pub season_year: Option<i32>,
    pub week: Option<i32>,
    pub guest_name: Option<String>,
    pub guest_score: Option<i32>,
    pub host_name: Option<String>,
    pub host_score: Option<i32>,
    pub is_playoff: bool,
    pub notes: Option<String>,
}

/// One team's participation in one season
///
/// Carries the counters the game processing pipeline mutates and the decimal
/// fields derived from them. Derived fields are `None` while undefined
/// (no games played, or no league average yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSeason {
    pub team_name: String,
    pub season_year: i32,
    pub league_name: String,
    pub games: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub points_for: i32,
    pub points_against: i32,
    pub offensive_average: Option<Decimal>,
    pub defensive_average: Option<Decimal>,
    pub offensive_factor: Option<Decimal>,
    pub defensive_factor: Option<Decimal>,
    pub expected_wins: Option<Decimal>,
    pub expected_losses: Option<Decimal>,
}

impl TeamSeason {
    /// A zeroed counter row for a team entering a season
    pub fn new(team_name: String, season_year: i32, league_name: String) -> Self {
        Self {
            team_name,
            season_year,
            league_name,
            games: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
            offensive_average: None,
            defensive_average: None,
            offensive_factor: None,
            defensive_factor: None,
            expected_wins: None,
            expected_losses: None,
        }
    }

    /// Add or subtract one game's scores; `delta` is `+1` or `-1`
    pub fn adjust_game_score(&mut self, delta: i32, scored: i32, allowed: i32) {
        self.games += delta;
        self.points_for += delta * scored;
        self.points_against += delta * allowed;
    }

    /// Recompute the averages and the expected record from the counters
    ///
    /// Expected wins follow the Pythagorean expectation with exponent 2:
    /// `games * pf^2 / (pf^2 + pa^2)`, with a 0.500 rate when no points have
    /// been scored at all.
    pub fn recalculate(&mut self) {
        self.offensive_average = average(self.points_for, self.games);
        self.defensive_average = average(self.points_against, self.games);

        if self.games <= 0 {
            self.expected_wins = None;
            self.expected_losses = None;
            return;
        }

        let pf = Decimal::from(self.points_for);
        let pa = Decimal::from(self.points_against);
        let denominator = pf * pf + pa * pa;
        let rate = if denominator.is_zero() {
            Decimal::new(5, 1)
        } else {
            pf * pf / denominator
        };
        let games = Decimal::from(self.games);
        let expected_wins = round2(games * rate);
        self.expected_losses = Some(round2(games - expected_wins));
        self.expected_wins = Some(expected_wins);
    }

    /// Refresh the league-relative factors
    ///
    /// `league_points_per_team` is half the league-season's average points
    /// per game (both teams score in every game). Factors are cleared while
    /// the league average is undefined or zero.
    pub fn update_factors(&mut self, league_points_per_team: Option<Decimal>) {
        match league_points_per_team {
            Some(per_team) if !per_team.is_zero() => {
                self.offensive_factor = self.offensive_average.map(|avg| round2(avg / per_team));
                self.defensive_factor = self.defensive_average.map(|avg| round2(avg / per_team));
            }
            _ => {
                self.offensive_factor = None;
                self.defensive_factor = None;
            }
        }
    }

    /// `(wins + ties/2) / games`, or `None` before the first game
    pub fn winning_percentage(&self) -> Option<Decimal> {
        if self.games <= 0 {
            return None;
        }
        let earned = Decimal::from(self.wins) + Decimal::from(self.ties) / Decimal::from(2);
        Some((earned / Decimal::from(self.games)).round_dp_with_strategy(
            3,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }
}

/// One league's participation in one season, carrying league-wide aggregates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSeason {
    pub league_name: String,
    pub season_year: i32,
    pub total_games: i32,
    pub total_points: i32,
    /// `None` exactly when `total_games` is zero
    pub average_points: Option<Decimal>,
}

impl LeagueSeason {
    pub fn new(league_name: String, season_year: i32) -> Self {
        Self {
            league_name,
            season_year,
            total_games: 0,
            total_points: 0,
            average_points: None,
        }
    }

    /// Set both totals and re-derive the average
    pub fn update_games_and_points(&mut self, total_games: i32, total_points: i32) {
        self.total_games = total_games;
        self.total_points = total_points;
        self.average_points = average(total_points, total_games);
    }

    /// Average points scored by one team per game in this league-season
    pub fn points_per_team(&self) -> Option<Decimal> {
        self.average_points.map(|avg| avg / Decimal::from(2))
    }
}

/// Totals slice returned by the persistence port for one league-season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSeasonTotals {
    pub total_games: i32,
    pub total_points: i32,
    pub average_points: Option<Decimal>,
    pub week_count: i32,
}

// ===== Read-only reporting projections =====

/// Standings row for one team-season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsTeamSeason {
    pub team_name: String,
    pub season_year: i32,
    pub league_name: String,
    pub games: i32,
    pub wins: i32,
    pub losses: i32,
    pub ties: i32,
    pub winning_percentage: Option<Decimal>,
    pub points_for: i32,
    pub points_against: i32,
}

/// Offensive rankings row; higher index ranks first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffensiveRankingsTeamSeason {
    pub team_name: String,
    pub season_year: i32,
    pub games: i32,
    pub points_for: i32,
    pub offensive_average: Option<Decimal>,
    pub offensive_factor: Option<Decimal>,
    pub offensive_index: Option<Decimal>,
}

/// Defensive rankings row; lower index ranks first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefensiveRankingsTeamSeason {
    pub team_name: String,
    pub season_year: i32,
    pub games: i32,
    pub points_against: i32,
    pub defensive_average: Option<Decimal>,
    pub defensive_factor: Option<Decimal>,
    pub defensive_index: Option<Decimal>,
}

/// Combined rankings row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalRankingsTeamSeason {
    pub team_name: String,
    pub season_year: i32,
    pub offensive_index: Option<Decimal>,
    pub defensive_index: Option<Decimal>,
    pub total_index: Option<Decimal>,
    pub final_expected_winning_percentage: Option<Decimal>,
}

/// One line of a team's season schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSeasonScheduleProfileRecord {
    pub week: i32,
    pub opponent_name: String,
    /// "W", "L" or "T" once decided
    pub outcome: Option<String>,
    pub points_for: i32,
    pub points_against: i32,
}

fn average(points: i32, games: i32) -> Option<Decimal> {
    if games > 0 {
        Some(round2(Decimal::from(points) / Decimal::from(games)))
    } else {
        None
    }
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(guest_score: i32, host_score: i32) -> Game {
        Game {
            id: 1,
            season_year: 1922,
            week: 1,
            guest_name: "Canton Bulldogs".to_string(),
            guest_score,
            host_name: "Chicago Cardinals".to_string(),
            host_score,
            winner_name: None,
            winner_score: None,
            loser_name: None,
            loser_score: None,
            is_playoff: false,
            notes: None,
        }
    }

    #[test]
    fn host_win_populates_all_four_fields() {
        let mut g = game(7, 14);
        g.decide_winner_and_loser();
        assert_eq!(g.winner_name.as_deref(), Some("Chicago Cardinals"));
        assert_eq!(g.winner_score, Some(14));
        assert_eq!(g.loser_name.as_deref(), Some("Canton Bulldogs"));
        assert_eq!(g.loser_score, Some(7));
        assert!(!g.is_tie());
    }

    #[test]
    fn guest_win_populates_all_four_fields() {
        let mut g = game(21, 3);
        g.decide_winner_and_loser();
        assert_eq!(g.winner_name.as_deref(), Some("Canton Bulldogs"));
        assert_eq!(g.loser_name.as_deref(), Some("Chicago Cardinals"));
    }

    #[test]
    fn tie_clears_all_four_fields() {
        let mut g = game(10, 17);
        g.decide_winner_and_loser();
        g.host_score = 10;
        g.decide_winner_and_loser();
        assert!(g.is_tie());
        assert_eq!(g.winner_name, None);
        assert_eq!(g.winner_score, None);
        assert_eq!(g.loser_name, None);
        assert_eq!(g.loser_score, None);
    }

    #[test]
    fn scoreless_game_is_a_tie() {
        let mut g = game(0, 0);
        g.decide_winner_and_loser();
        assert!(g.is_tie());
        assert_eq!(g.winner_name, None);
    }

    #[test]
    fn adjust_game_score_round_trips() {
        let mut ts = TeamSeason::new("Akron Pros".into(), 1920, "APFA".into());
        ts.adjust_game_score(1, 14, 7);
        ts.recalculate();
        assert_eq!(ts.games, 1);
        assert_eq!(ts.points_for, 14);
        assert_eq!(ts.points_against, 7);
        assert_eq!(ts.offensive_average, Some(Decimal::from(14)));
        assert_eq!(ts.defensive_average, Some(Decimal::from(7)));

        ts.adjust_game_score(-1, 14, 7);
        ts.recalculate();
        assert_eq!(ts.games, 0);
        assert_eq!(ts.points_for, 0);
        assert_eq!(ts.points_against, 0);
        assert_eq!(ts.offensive_average, None);
        assert_eq!(ts.expected_wins, None);
    }

    #[test]
    fn pythagorean_expected_record() {
        let mut ts = TeamSeason::new("Akron Pros".into(), 1920, "APFA".into());
        ts.adjust_game_score(1, 14, 7);
        ts.recalculate();
        // 196 / (196 + 49) = 0.80
        assert_eq!(ts.expected_wins, Some(Decimal::new(80, 2)));
        assert_eq!(ts.expected_losses, Some(Decimal::new(20, 2)));
    }

    #[test]
    fn expected_record_with_no_points_is_even() {
        let mut ts = TeamSeason::new("Akron Pros".into(), 1920, "APFA".into());
        ts.adjust_game_score(1, 0, 0);
        ts.ties += 1;
        ts.recalculate();
        assert_eq!(ts.expected_wins, Some(Decimal::new(50, 2)));
        assert_eq!(ts.expected_losses, Some(Decimal::new(50, 2)));
    }

    #[test]
    fn factors_are_league_relative() {
        let mut ts = TeamSeason::new("Akron Pros".into(), 1920, "APFA".into());
        ts.adjust_game_score(1, 21, 7);
        ts.recalculate();
        // League average of 28 points per game, so 14 per team.
        ts.update_factors(Some(Decimal::from(14)));
        assert_eq!(ts.offensive_factor, Some(Decimal::new(150, 2)));
        assert_eq!(ts.defensive_factor, Some(Decimal::new(50, 2)));

        ts.update_factors(None);
        assert_eq!(ts.offensive_factor, None);
        assert_eq!(ts.defensive_factor, None);
    }

    #[test]
    fn winning_percentage_counts_ties_as_half() {
        let mut ts = TeamSeason::new("Akron Pros".into(), 1920, "APFA".into());
        assert_eq!(ts.winning_percentage(), None);
        ts.games = 4;
        ts.wins = 2;
        ts.losses = 1;
        ts.ties = 1;
        assert_eq!(ts.winning_percentage(), Some(Decimal::new(625, 3)));
    }

    #[test]
    fn league_season_average_is_null_without_games() {
        let mut ls = LeagueSeason::new("APFA".into(), 1920);
        ls.update_games_and_points(0, 0);
        assert_eq!(ls.average_points, None);

        ls.update_games_and_points(3, 63);
        assert_eq!(ls.average_points, Some(Decimal::from(21)));
        assert_eq!(ls.points_per_team(), Some(Decimal::new(105, 1)));
    }
}
