//! Process-game strategy
//!
//! The three-way mutation protocol of the pipeline: Apply adds a game's
//! effect to the two affected team-seasons, Revert subtracts it, Noop does
//! nothing. Selection is a pure function of the caller-supplied direction
//! token; anything that is not UP or DOWN selects Noop.

use crate::contract::{ArchiveError, Game};
use crate::domain::repository::GameStoreTx;

/// Direction token consumed by the strategy factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// UP and DOWN are the only meaningful tokens
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "UP" => Some(Self::Up),
            "DOWN" => Some(Self::Down),
            _ => None,
        }
    }
}

/// The process-game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessGameStrategy {
    Apply,
    Revert,
    #[default]
    Noop,
}

impl ProcessGameStrategy {
    /// Map a direction token to a variant; unknown tokens select Noop
    pub fn for_token(token: &str) -> Self {
        match Direction::parse(token) {
            Some(Direction::Up) => Self::Apply,
            Some(Direction::Down) => Self::Revert,
            None => Self::Noop,
        }
    }

    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Apply,
            Direction::Down => Self::Revert,
        }
    }

    /// Propagate `game` into the affected team-season rows
    ///
    /// A team without a materialized team-season row is skipped silently,
    /// independently per side; historical games may involve teams whose
    /// season row does not exist yet.
    pub async fn process(
        self,
        tx: &mut dyn GameStoreTx,
        game: &Game,
    ) -> Result<(), ArchiveError> {
        match self {
            Self::Apply => adjust(tx, game, 1).await,
            Self::Revert => adjust(tx, game, -1).await,
            Self::Noop => Ok(()),
        }
    }
}

async fn adjust(tx: &mut dyn GameStoreTx, game: &Game, delta: i32) -> Result<(), ArchiveError> {
    let sides = [
        (&game.guest_name, game.guest_score, game.host_score),
        (&game.host_name, game.host_score, game.guest_score),
    ];

    for (team_name, scored, allowed) in sides {
        if let Some(mut ts) = tx.get_team_season(team_name, game.season_year).await? {
            ts.adjust_game_score(delta, scored, allowed);
            if game.is_tie() {
                ts.ties += delta;
            }
            ts.recalculate();
            tx.save_team_season(&ts).await?;
        }
    }

    if game.is_tie() {
        return Ok(());
    }

    if let Some(winner_name) = &game.winner_name {
        if let Some(mut ts) = tx.get_team_season(winner_name, game.season_year).await? {
            ts.wins += delta;
            tx.save_team_season(&ts).await?;
        }
    }
    if let Some(loser_name) = &game.loser_name {
        if let Some(mut ts) = tx.get_team_season(loser_name, game.season_year).await? {
            ts.losses += delta;
            tx.save_team_season(&ts).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_selects_apply() {
        assert_eq!(ProcessGameStrategy::for_token("UP"), ProcessGameStrategy::Apply);
    }

    #[test]
    fn down_selects_revert() {
        assert_eq!(ProcessGameStrategy::for_token("DOWN"), ProcessGameStrategy::Revert);
    }

    #[test]
    fn anything_else_selects_noop() {
        assert_eq!(ProcessGameStrategy::for_token(""), ProcessGameStrategy::Noop);
        assert_eq!(ProcessGameStrategy::for_token("up"), ProcessGameStrategy::Noop);
        assert_eq!(ProcessGameStrategy::for_token("SIDEWAYS"), ProcessGameStrategy::Noop);
    }
}
