//! Database migrations for the archive

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalog::Migration),
            Box::new(m20250301_000002_create_games_and_aggregates::Migration),
        ]
    }
}

mod m20250301_000001_create_catalog {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Seasons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Seasons::Year)
                                .integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Seasons::NumOfWeeksScheduled)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Seasons::NumOfWeeksCompleted)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Leagues::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Leagues::ShortName)
                                .string_len(5)
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Leagues::LongName)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Leagues::FirstSeasonYear).integer().not_null())
                        .col(ColumnDef::new(Leagues::LastSeasonYear).integer())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_leagues_first_season")
                                .from(Leagues::Table, Leagues::FirstSeasonYear)
                                .to(Seasons::Table, Seasons::Year),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Conferences::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Conferences::ShortName)
                                .string_len(5)
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Conferences::LongName)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Conferences::LeagueName).string_len(5).not_null())
                        .col(
                            ColumnDef::new(Conferences::FirstSeasonYear)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Conferences::LastSeasonYear).integer())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_conferences_league")
                                .from(Conferences::Table, Conferences::LeagueName)
                                .to(Leagues::Table, Leagues::ShortName),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Divisions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Divisions::Name)
                                .string_len(50)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Divisions::LeagueName).string_len(5).not_null())
                        .col(ColumnDef::new(Divisions::ConferenceName).string_len(5))
                        .col(ColumnDef::new(Divisions::FirstSeasonYear).integer().not_null())
                        .col(ColumnDef::new(Divisions::LastSeasonYear).integer())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_divisions_league")
                                .from(Divisions::Table, Divisions::LeagueName)
                                .to(Leagues::Table, Leagues::ShortName),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Teams::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Teams::Name)
                                .string_len(50)
                                .not_null()
                                .primary_key(),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Teams::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Divisions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Conferences::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Leagues::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Seasons::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Seasons {
        Table,
        Year,
        NumOfWeeksScheduled,
        NumOfWeeksCompleted,
    }

    #[derive(DeriveIden)]
    enum Leagues {
        Table,
        ShortName,
        LongName,
        FirstSeasonYear,
        LastSeasonYear,
    }

    #[derive(DeriveIden)]
    enum Conferences {
        Table,
        ShortName,
        LongName,
        LeagueName,
        FirstSeasonYear,
        LastSeasonYear,
    }

    #[derive(DeriveIden)]
    enum Divisions {
        Table,
        Name,
        LeagueName,
        ConferenceName,
        FirstSeasonYear,
        LastSeasonYear,
    }

    #[derive(DeriveIden)]
    enum Teams {
        Table,
        Name,
    }
}

mod m20250301_000002_create_games_and_aggregates {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Games::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Games::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Games::SeasonYear).integer().not_null())
                        .col(ColumnDef::new(Games::Week).integer().not_null())
                        .col(ColumnDef::new(Games::GuestName).string_len(50).not_null())
                        .col(ColumnDef::new(Games::GuestScore).integer().not_null())
                        .col(ColumnDef::new(Games::HostName).string_len(50).not_null())
                        .col(ColumnDef::new(Games::HostScore).integer().not_null())
                        .col(ColumnDef::new(Games::WinnerName).string_len(50))
                        .col(ColumnDef::new(Games::WinnerScore).integer())
                        .col(ColumnDef::new(Games::LoserName).string_len(50))
                        .col(ColumnDef::new(Games::LoserScore).integer())
                        .col(
                            ColumnDef::new(Games::IsPlayoff)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Games::Notes).text())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_games_season")
                                .from(Games::Table, Games::SeasonYear)
                                .to(Seasons::Table, Seasons::Year),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_games_season_week")
                        .table(Games::Table)
                        .col(Games::SeasonYear)
                        .col(Games::Week)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(TeamSeasons::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(TeamSeasons::TeamName).string_len(50).not_null())
                        .col(ColumnDef::new(TeamSeasons::SeasonYear).integer().not_null())
                        .col(ColumnDef::new(TeamSeasons::LeagueName).string_len(5).not_null())
                        .col(ColumnDef::new(TeamSeasons::Games).integer().not_null().default(0))
                        .col(ColumnDef::new(TeamSeasons::Wins).integer().not_null().default(0))
                        .col(ColumnDef::new(TeamSeasons::Losses).integer().not_null().default(0))
                        .col(ColumnDef::new(TeamSeasons::Ties).integer().not_null().default(0))
                        .col(
                            ColumnDef::new(TeamSeasons::PointsFor)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(TeamSeasons::PointsAgainst)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(TeamSeasons::OffensiveAverage).decimal_len(10, 4))
                        .col(ColumnDef::new(TeamSeasons::DefensiveAverage).decimal_len(10, 4))
                        .col(ColumnDef::new(TeamSeasons::OffensiveFactor).decimal_len(10, 4))
                        .col(ColumnDef::new(TeamSeasons::DefensiveFactor).decimal_len(10, 4))
                        .col(ColumnDef::new(TeamSeasons::ExpectedWins).decimal_len(10, 4))
                        .col(ColumnDef::new(TeamSeasons::ExpectedLosses).decimal_len(10, 4))
                        .primary_key(
                            Index::create()
                                .col(TeamSeasons::TeamName)
                                .col(TeamSeasons::SeasonYear),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_team_seasons_team")
                                .from(TeamSeasons::Table, TeamSeasons::TeamName)
                                .to(Teams::Table, Teams::Name),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_team_seasons_season")
                                .from(TeamSeasons::Table, TeamSeasons::SeasonYear)
                                .to(Seasons::Table, Seasons::Year),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_team_seasons_league")
                                .from(TeamSeasons::Table, TeamSeasons::LeagueName)
                                .to(Leagues::Table, Leagues::ShortName),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_team_seasons_league_year")
                        .table(TeamSeasons::Table)
                        .col(TeamSeasons::LeagueName)
                        .col(TeamSeasons::SeasonYear)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(LeagueSeasons::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(LeagueSeasons::LeagueName)
                                .string_len(5)
                                .not_null(),
                        )
                        .col(ColumnDef::new(LeagueSeasons::SeasonYear).integer().not_null())
                        .col(
                            ColumnDef::new(LeagueSeasons::TotalGames)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(LeagueSeasons::TotalPoints)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(LeagueSeasons::AveragePoints).decimal_len(10, 4))
                        .primary_key(
                            Index::create()
                                .col(LeagueSeasons::LeagueName)
                                .col(LeagueSeasons::SeasonYear),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_league_seasons_league")
                                .from(LeagueSeasons::Table, LeagueSeasons::LeagueName)
                                .to(Leagues::Table, Leagues::ShortName),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_league_seasons_season")
                                .from(LeagueSeasons::Table, LeagueSeasons::SeasonYear)
                                .to(Seasons::Table, Seasons::Year),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(LeagueSeasons::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TeamSeasons::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Games::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Games {
        Table,
        Id,
        SeasonYear,
        Week,
        GuestName,
        GuestScore,
        HostName,
        HostScore,
        WinnerName,
        WinnerScore,
        LoserName,
        LoserScore,
        IsPlayoff,
        Notes,
    }

    #[derive(DeriveIden)]
    enum TeamSeasons {
        Table,
        TeamName,
        SeasonYear,
        LeagueName,
        Games,
        Wins,
        Losses,
        Ties,
        PointsFor,
        PointsAgainst,
        OffensiveAverage,
        DefensiveAverage,
        OffensiveFactor,
        DefensiveFactor,
        ExpectedWins,
        ExpectedLosses,
    }

    #[derive(DeriveIden)]
    enum LeagueSeasons {
        Table,
        LeagueName,
        SeasonYear,
        TotalGames,
        TotalPoints,
        AveragePoints,
    }

    #[derive(DeriveIden)]
    enum Seasons {
        Table,
        Year,
    }

    #[derive(DeriveIden)]
    enum Teams {
        Table,
        Name,
    }

    #[derive(DeriveIden)]
    enum Leagues {
        Table,
        ShortName,
    }
}
