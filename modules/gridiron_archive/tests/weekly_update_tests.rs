//! Weekly update batch tests over the in-memory archive

mod common;

use common::{weekly_over, MemoryArchive};
use gridiron_archive::contract::ArchiveError;
use gridiron_archive::domain::weekly::WeeklyUpdateSummary;
use rust_decimal::Decimal;
use std::sync::Arc;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Season 1925, league NFL, six teams with materialized season rows
fn seeded_archive() -> Arc<MemoryArchive> {
    let archive = MemoryArchive::new();
    archive.seed_season(1925, 14);
    archive.seed_league("NFL", "National Football League", 1925);
    for team in [
        "Chicago Bears",
        "Green Bay Packers",
        "Chicago Cardinals",
        "New York Giants",
        "Canton Bulldogs",
        "Pottsville Maroons",
    ] {
        archive.seed_team(team);
        archive.seed_team_season(team, 1925, "NFL");
    }
    archive
}

#[tokio::test]
async fn processes_every_game_of_the_week_in_one_batch() {
    let archive = seeded_archive();
    archive.seed_unprocessed_game(1925, 3, "Chicago Bears", 21, "Green Bay Packers", 14);
    archive.seed_unprocessed_game(1925, 3, "Chicago Cardinals", 7, "New York Giants", 7);
    archive.seed_unprocessed_game(1925, 3, "Canton Bulldogs", 13, "Pottsville Maroons", 6);
    let weekly = weekly_over(&archive);

    let summary = weekly.run(Some(1925), Some(3)).await.unwrap();
    assert_eq!(
        summary,
        WeeklyUpdateSummary {
            season_year: 1925,
            week: 3,
            games_processed: 3,
        }
    );

    let bears = archive.team_season("Chicago Bears", 1925).unwrap();
    assert_eq!(bears.games, 1);
    assert_eq!(bears.wins, 1);
    assert_eq!(bears.points_for, 21);
    assert_eq!(bears.points_against, 14);

    let cardinals = archive.team_season("Chicago Cardinals", 1925).unwrap();
    assert_eq!(cardinals.ties, 1);
    assert_eq!(cardinals.wins, 0);
    assert_eq!(cardinals.losses, 0);

    let maroons = archive.team_season("Pottsville Maroons", 1925).unwrap();
    assert_eq!(maroons.losses, 1);
    assert_eq!(maroons.points_for, 6);

    // 35 + 14 + 19 points over three games
    let nfl = archive.league_season("NFL", 1925).unwrap();
    assert_eq!(nfl.total_games, 3);
    assert_eq!(nfl.total_points, 68);
    assert_eq!(nfl.average_points, Some(dec("22.67")));
}

#[tokio::test]
async fn refreshes_factors_against_the_new_league_average() {
    let archive = seeded_archive();
    archive.seed_unprocessed_game(1925, 3, "Chicago Bears", 21, "Green Bay Packers", 14);
    archive.seed_unprocessed_game(1925, 3, "Chicago Cardinals", 7, "New York Giants", 7);
    archive.seed_unprocessed_game(1925, 3, "Canton Bulldogs", 13, "Pottsville Maroons", 6);
    let weekly = weekly_over(&archive);

    weekly.run(Some(1925), Some(3)).await.unwrap();

    // league average 22.67, 11.335 points per team
    let bears = archive.team_season("Chicago Bears", 1925).unwrap();
    assert_eq!(bears.offensive_average, Some(dec("21.00")));
    assert_eq!(bears.offensive_factor, Some(dec("1.85")));
    assert_eq!(bears.defensive_factor, Some(dec("1.24")));
}

#[tokio::test]
async fn only_the_requested_week_is_applied() {
    let archive = seeded_archive();
    archive.seed_unprocessed_game(1925, 2, "Canton Bulldogs", 3, "Pottsville Maroons", 0);
    archive.seed_unprocessed_game(1925, 3, "Chicago Bears", 21, "Green Bay Packers", 14);
    let weekly = weekly_over(&archive);

    let summary = weekly.run(Some(1925), Some(3)).await.unwrap();
    assert_eq!(summary.games_processed, 1);

    // the week-2 game stays unapplied
    let bulldogs = archive.team_season("Canton Bulldogs", 1925).unwrap();
    assert_eq!(bulldogs.games, 0);
    assert_eq!(bulldogs.wins, 0);

    let bears = archive.team_season("Chicago Bears", 1925).unwrap();
    assert_eq!(bears.games, 1);
}

#[tokio::test]
async fn an_empty_week_processes_nothing() {
    let archive = seeded_archive();
    let weekly = weekly_over(&archive);

    let summary = weekly.run(Some(1925), Some(9)).await.unwrap();
    assert_eq!(summary.games_processed, 0);

    let nfl = archive.league_season("NFL", 1925).unwrap();
    assert_eq!(nfl.total_games, 0);
    assert_eq!(nfl.average_points, None);
}

#[tokio::test]
async fn guards_the_season_year() {
    let archive = seeded_archive();
    let weekly = weekly_over(&archive);

    let err = weekly.run(None, Some(3)).await.unwrap_err();
    assert_eq!(
        err,
        ArchiveError::InvalidArgument {
            param: "season_year".to_string()
        }
    );
}

#[tokio::test]
async fn guards_the_week() {
    let archive = seeded_archive();
    let weekly = weekly_over(&archive);

    let err = weekly.run(Some(1925), None).await.unwrap_err();
    assert_eq!(
        err,
        ArchiveError::InvalidArgument {
            param: "week".to_string()
        }
    );
}

#[tokio::test]
async fn rejects_years_before_the_first_season() {
    let archive = seeded_archive();
    let weekly = weekly_over(&archive);

    let err = weekly.run(Some(1919), Some(3)).await.unwrap_err();
    assert!(matches!(err, ArchiveError::Validation { .. }));
}
