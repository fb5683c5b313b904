//! Tournament record and TournamentError.

use crate::models::bracket::{Bracket, BracketRound};
use crate::models::game::{ByGroup, Match};
use crate::models::player::{Player, PlayerId, Team};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Teams needed for a schedule or a bracket.
pub const MIN_TEAMS: usize = 4;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Schedule or bracket needs more teams.
    InsufficientTeams { required: usize, found: usize },
    /// Score text is neither `-` nor `<int>:<int>`.
    MalformedScore,
    /// A knockout match ended in a tie and has to be replayed.
    UndecidedMatch(BracketRound),
    /// The schedule has already been generated for this tournament.
    ScheduleAlreadyGenerated,
    /// Teams cannot change once the schedule exists.
    ScheduleLocked,
    /// The bracket is already seeded; reset it explicitly first.
    BracketAlreadySeeded,
    /// No bracket has been seeded yet.
    BracketNotSeeded,
    /// Third place and final open only once both semi-finals have a winner.
    BracketMatchUnavailable(BracketRound),
    /// No match with this number (in this group).
    MatchNotFound,
    /// Names must not be empty.
    InvalidName,
    /// A team with this name already exists (case-insensitive).
    DuplicateTeamName,
    /// A tournament with this name already exists.
    DuplicateTournamentName,
    PlayerNotFound(PlayerId),
    /// Player already plays for another team.
    PlayerUnavailable(PlayerId),
    /// A team needs two different players.
    SamePlayerTwice,
    TournamentNotFound(String),
    NoTournamentSelected,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams { required, found } => {
                write!(f, "Need at least {} teams (have {})", required, found)
            }
            TournamentError::MalformedScore => write!(f, "Score must be '-' or '<goals>:<goals>'"),
            TournamentError::UndecidedMatch(round) => {
                write!(f, "{} is tied: unresolved, replay required", round)
            }
            TournamentError::ScheduleAlreadyGenerated => write!(f, "Schedule has already been generated"),
            TournamentError::ScheduleLocked => write!(f, "Teams cannot change once the schedule exists"),
            TournamentError::BracketAlreadySeeded => {
                write!(f, "Knockout round already exists; reset it before seeding again")
            }
            TournamentError::BracketNotSeeded => write!(f, "Knockout round has not been generated"),
            TournamentError::BracketMatchUnavailable(round) => {
                write!(f, "{} is not available until both semi-finals have a winner", round)
            }
            TournamentError::MatchNotFound => write!(f, "Match not found"),
            TournamentError::InvalidName => write!(f, "Name must not be empty"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::DuplicateTournamentName => {
                write!(f, "A tournament with this name already exists")
            }
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::PlayerUnavailable(_) => write!(f, "Player already belongs to a team"),
            TournamentError::SamePlayerTwice => write!(f, "A team needs two different players"),
            TournamentError::TournamentNotFound(name) => write!(f, "No tournament named '{}'", name),
            TournamentError::NoTournamentSelected => write!(f, "No tournament selected"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// One tournament: roster, schedule, groups, and knockout round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub date: NaiveDate,
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    /// League schedule (no group mode).
    pub matches: Vec<Match>,
    #[serde(default)]
    pub ko_round: Option<Bracket>,
    /// Two groups, then a cross-group knockout round.
    pub group_phase: bool,
    /// Team names per group.
    #[serde(default)]
    pub groups: ByGroup<Vec<String>>,
    #[serde(default)]
    pub group_matches: ByGroup<Vec<Match>>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, date: NaiveDate, group_phase: bool) -> Self {
        Self {
            name: name.into(),
            date,
            players: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
            ko_round: None,
            group_phase,
            groups: ByGroup::default(),
            group_matches: ByGroup::default(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Team names in registration order.
    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether a league schedule or group split exists.
    pub fn has_schedule(&self) -> bool {
        !self.matches.is_empty()
            || self.groups.iter().any(|(_, teams)| !teams.is_empty())
            || self.group_matches.iter().any(|(_, matches)| !matches.is_empty())
    }

    /// Players not yet on any team.
    pub fn available_players(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| !self.teams.iter().any(|t| t.has_player(p.id)))
            .collect()
    }

    /// Register a player. Returns the new player's id.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        avatar: Option<String>,
    ) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        let player = Player::new(name, avatar);
        let id = player.id;
        log::info!("Tournament '{}': added player '{}'", self.name, name);
        self.players.push(player);
        Ok(id)
    }

    /// Form a team from two distinct available players. Not allowed once the schedule exists.
    pub fn create_team(
        &mut self,
        name: impl Into<String>,
        first: PlayerId,
        second: PlayerId,
    ) -> Result<(), TournamentError> {
        if self.has_schedule() {
            return Err(TournamentError::ScheduleLocked);
        }
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }
        if self.teams.iter().any(|t| t.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicateTeamName);
        }
        if first == second {
            return Err(TournamentError::SamePlayerTwice);
        }
        for id in [first, second] {
            if self.player(id).is_none() {
                return Err(TournamentError::PlayerNotFound(id));
            }
            if self.teams.iter().any(|t| t.has_player(id)) {
                return Err(TournamentError::PlayerUnavailable(id));
            }
        }
        let team = match (self.player(first), self.player(second)) {
            (Some(p1), Some(p2)) => Team::new(name, p1, p2),
            _ => return Err(TournamentError::PlayerNotFound(first)),
        };
        log::info!(
            "Tournament '{}': created team '{}' ({} & {})",
            self.name,
            team.name,
            team.players[0],
            team.players[1]
        );
        self.teams.push(team);
        Ok(())
    }
}
