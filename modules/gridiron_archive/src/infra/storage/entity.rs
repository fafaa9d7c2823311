//! SeaORM entities for the archive tables
//!
//! Catalog rows use natural primary keys (name, year); games carry an
//! auto-incremented id; the aggregate tables use composite natural keys.

/// Seasons table
pub mod season {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "seasons")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub year: i32,
        pub num_of_weeks_scheduled: i32,
        pub num_of_weeks_completed: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::game::Entity")]
        Games,
    }

    impl Related<super::game::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Games.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Leagues table
pub mod league {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "leagues")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub short_name: String,
        #[sea_orm(unique)]
        pub long_name: String,
        pub first_season_year: i32,
        pub last_season_year: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::league_season::Entity")]
        LeagueSeasons,
    }

    impl Related<super::league_season::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::LeagueSeasons.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Conferences table
pub mod conference {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "conferences")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub short_name: String,
        #[sea_orm(unique)]
        pub long_name: String,
        pub league_name: String,
        pub first_season_year: i32,
        pub last_season_year: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::league::Entity",
            from = "Column::LeagueName",
            to = "super::league::Column::ShortName"
        )]
        League,
    }

    impl Related<super::league::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::League.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Divisions table
pub mod division {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "divisions")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub name: String,
        pub league_name: String,
        pub conference_name: Option<String>,
        pub first_season_year: i32,
        pub last_season_year: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::league::Entity",
            from = "Column::LeagueName",
            to = "super::league::Column::ShortName"
        )]
        League,
    }

    impl Related<super::league::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::League.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Teams table
pub mod team {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "teams")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::team_season::Entity")]
        TeamSeasons,
    }

    impl Related<super::team_season::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::TeamSeasons.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Games table
pub mod game {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "games")]
    pub struct Model {
        #[sea_orm(primary_key)]
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

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::season::Entity",
            from = "Column::SeasonYear",
            to = "super::season::Column::Year"
        )]
        Season,
    }

    impl Related<super::season::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Season.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Team-seasons table, the counter rows the pipeline mutates
pub mod team_season {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "team_seasons")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub team_name: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub season_year: i32,
        pub league_name: String,
        pub games: i32,
        pub wins: i32,
        pub losses: i32,
        pub ties: i32,
        pub points_for: i32,
        pub points_against: i32,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub offensive_average: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub defensive_average: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub offensive_factor: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub defensive_factor: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub expected_wins: Option<Decimal>,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub expected_losses: Option<Decimal>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::team::Entity",
            from = "Column::TeamName",
            to = "super::team::Column::Name"
        )]
        Team,
        #[sea_orm(
            belongs_to = "super::league::Entity",
            from = "Column::LeagueName",
            to = "super::league::Column::ShortName"
        )]
        League,
    }

    impl Related<super::team::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Team.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// League-seasons table, the league-wide aggregate rows
pub mod league_season {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "league_seasons")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub league_name: String,
        #[sea_orm(primary_key, auto_increment = false)]
        pub season_year: i32,
        pub total_games: i32,
        pub total_points: i32,
        #[sea_orm(column_type = "Decimal(Some((10, 4)))", nullable)]
        pub average_points: Option<Decimal>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::league::Entity",
            from = "Column::LeagueName",
            to = "super::league::Column::ShortName"
        )]
        League,
    }

    impl Related<super::league::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::League.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
