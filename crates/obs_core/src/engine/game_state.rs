//! Game State Snapshot
//!
//! One immutable snapshot per tick, supplied by whatever reads the match
//! (memory reader, simulator, replay). Observation builders only borrow it.
//!
//! ## Contract
//! 1. All fields describe the same instant
//! 2. Rotation frames are orthonormal, all values finite
//! 3. Boost pad flags and timers have the same length and follow
//!    `physics_constants::boost_pads::LOCATIONS` order (blue point of view)
//!
//! `GameState::validate()` checks the contract; the builders do not.

use std::collections::HashSet;
use std::path::Path;

use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::physics_constants::car;
use super::types::{PhysState, PrevAction, Team};
use crate::error::{ObsError, Result};

/// Tolerance for `Mᵀ·M = I` in `validate()`
pub const ORTHONORMAL_TOLERANCE: f32 = 1e-3;

// =============================================================================
// Player
// =============================================================================

/// One car and its status flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    /// Unique id within the match
    pub car_id: u32,
    pub team: Team,
    /// Physics (world frame, never pre-inverted)
    pub phys: PhysState,
    /// Boost amount, 0-100
    #[serde(default)]
    pub boost: f32,
    /// Wheels touching a surface
    #[serde(default)]
    pub on_ground: bool,
    /// First jump used since last landing
    #[serde(default)]
    pub has_jumped: bool,
    /// Second jump used since last landing
    #[serde(default)]
    pub has_double_jumped: bool,
    /// Dodge used since last landing
    #[serde(default)]
    pub has_flipped: bool,
    #[serde(default)]
    pub is_demoed: bool,
    /// Controls applied on the previous tick
    #[serde(default)]
    pub prev_action: PrevAction,
}

impl Player {
    /// Car at rest on the ground with a full jump and 33 boost (kickoff defaults).
    pub fn new(car_id: u32, team: Team, phys: PhysState) -> Self {
        Self {
            car_id,
            team,
            phys,
            boost: 33.0,
            on_ground: true,
            has_jumped: false,
            has_double_jumped: false,
            has_flipped: false,
            is_demoed: false,
            prev_action: PrevAction::ZERO,
        }
    }

    /// Boost normalised to 0-1
    #[inline]
    pub fn boost_fraction(&self) -> f32 {
        self.boost / car::MAX_BOOST
    }

    /// Jump or dodge still available.
    ///
    /// The jump is available until used. After the first jump, the dodge
    /// (or double jump) stays available until either is spent. Regaining
    /// this while `has_jumped` is still set is a flip reset.
    #[inline]
    pub fn has_flip_or_jump(&self) -> bool {
        !self.has_jumped || (!self.has_flipped && !self.has_double_jumped)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.phys.vel.norm()
    }

    #[inline]
    pub fn is_supersonic(&self) -> bool {
        self.speed() >= car::SUPERSONIC_THRESHOLD
    }
}

// =============================================================================
// GameState
// =============================================================================

/// Snapshot of a match at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GameStateRepr", into = "GameStateRepr")]
pub struct GameState {
    /// Tick counter of the producer (informational)
    pub tick_count: u64,
    /// Ball physics (world frame)
    pub ball: PhysState,
    /// Roster in producer order
    pub players: Vec<Player>,

    boost_pads: Vec<bool>,
    boost_pad_timers: Vec<f32>,
    inverted_boost_pads: Vec<bool>,
    inverted_boost_pad_timers: Vec<f32>,
}

impl GameState {
    pub fn new(
        ball: PhysState,
        players: Vec<Player>,
        boost_pads: Vec<bool>,
        boost_pad_timers: Vec<f32>,
    ) -> Self {
        let mut state = Self {
            tick_count: 0,
            ball,
            players,
            boost_pads: Vec::new(),
            boost_pad_timers: Vec::new(),
            inverted_boost_pads: Vec::new(),
            inverted_boost_pad_timers: Vec::new(),
        };
        state.set_boost_pads(boost_pads, boost_pad_timers);
        state
    }

    /// Replace the pad tables (blue order) and rebuild the orange-side copies.
    pub fn set_boost_pads(&mut self, pads: Vec<bool>, timers: Vec<f32>) {
        self.inverted_boost_pads = pads.iter().rev().copied().collect();
        self.inverted_boost_pad_timers = timers.iter().rev().copied().collect();
        self.boost_pads = pads;
        self.boost_pad_timers = timers;
    }

    /// Pad availability flags as seen by the given side
    #[inline]
    pub fn boost_pads(&self, inverted: bool) -> &[bool] {
        if inverted {
            &self.inverted_boost_pads
        } else {
            &self.boost_pads
        }
    }

    /// Seconds until respawn for each pad, as seen by the given side
    #[inline]
    pub fn boost_pad_timers(&self, inverted: bool) -> &[f32] {
        if inverted {
            &self.inverted_boost_pad_timers
        } else {
            &self.boost_pad_timers
        }
    }

    #[inline]
    pub fn boost_pad_count(&self) -> usize {
        self.boost_pads.len()
    }

    pub fn find_player(&self, car_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.car_id == car_id)
    }

    pub fn player(&self, car_id: u32) -> Result<&Player> {
        self.find_player(car_id).ok_or(ObsError::PlayerNotFound { car_id })
    }

    /// Players of one team, roster order
    pub fn team_players(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == team)
    }

    // =========================================================================
    // Contract checks
    // =========================================================================

    /// Check the snapshot contract. Fails on the first violation.
    pub fn validate(&self) -> Result<()> {
        check_phys(&self.ball, "ball")?;

        let mut seen = HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if !seen.insert(player.car_id) {
                return Err(ObsError::DuplicatePlayerId { car_id: player.car_id });
            }
            check_phys(&player.phys, &format!("player[{}]", player.car_id))?;
            if !player.prev_action.is_finite() {
                return Err(ObsError::NonFinite {
                    field: format!("player[{}].prev_action", player.car_id),
                });
            }
            if !(0.0..=car::MAX_BOOST).contains(&player.boost) {
                return Err(ObsError::BoostOutOfRange {
                    car_id: player.car_id,
                    boost: player.boost,
                });
            }
        }

        if self.boost_pads.len() != self.boost_pad_timers.len() {
            return Err(ObsError::BoostTableMismatch {
                pads: self.boost_pads.len(),
                timers: self.boost_pad_timers.len(),
            });
        }
        for (index, &timer) in self.boost_pad_timers.iter().enumerate() {
            if !timer.is_finite() {
                return Err(ObsError::NonFinite { field: format!("boost_pad_timers[{}]", index) });
            }
            if timer < 0.0 {
                return Err(ObsError::NegativePadTimer { index, timer });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Loading
    // =========================================================================

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load a snapshot file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn check_phys(phys: &PhysState, field: &str) -> Result<()> {
    if !phys.is_finite() {
        return Err(ObsError::NonFinite { field: field.to_owned() });
    }
    let error = phys.rot_mat.orthonormal_error();
    if error > ORTHONORMAL_TOLERANCE {
        return Err(ObsError::RotationNotOrthonormal { field: field.to_owned(), error });
    }
    Ok(())
}

// =============================================================================
// Serialized form
// =============================================================================

/// Wire form of `GameState`: only the blue-side pad tables are stored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GameStateRepr {
    #[serde(default)]
    pub tick_count: u64,
    pub ball: PhysState,
    pub players: Vec<Player>,
    /// Availability per pad, blue point of view
    pub boost_pads: Vec<bool>,
    /// Seconds until respawn per pad (0 when available)
    pub boost_pad_timers: Vec<f32>,
}

impl From<GameStateRepr> for GameState {
    fn from(r: GameStateRepr) -> Self {
        let mut state = GameState::new(r.ball, r.players, r.boost_pads, r.boost_pad_timers);
        state.tick_count = r.tick_count;
        state
    }
}

impl From<GameState> for GameStateRepr {
    fn from(s: GameState) -> Self {
        Self {
            tick_count: s.tick_count,
            ball: s.ball,
            players: s.players,
            boost_pads: s.boost_pads,
            boost_pad_timers: s.boost_pad_timers,
        }
    }
}

impl JsonSchema for GameState {
    fn schema_name() -> String {
        "GameState".to_owned()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        GameStateRepr::json_schema(gen)
    }
}

// =============================================================================
// Tests
// =============================================================================
