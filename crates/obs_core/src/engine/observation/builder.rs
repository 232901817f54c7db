//! ObservationBuilder Trait
//!
//! Every builder maps `(Player, GameState)` to a flat `Observation`. The
//! snapshot is only borrowed; builders keep nothing between calls.

use tracing::{trace, warn};

use super::writer::{ObsLayout, ObsWriter, Observation};
use crate::engine::config::ObsConfig;
use crate::engine::game_state::{GameState, Player};
use crate::error::{ObsError, Result};

/// Observation builder trait
///
/// Implementors provide `obs_len` and `encode`; `build`, `build_checked`
/// and `layout` are derived from those two.
pub trait ObservationBuilder: Send + Sync {
    /// Short name, used in logs and by the CLI
    fn name(&self) -> &'static str;

    /// Coefficients and slot counts this builder was created with
    fn config(&self) -> &ObsConfig;

    /// Exact output length for this player and snapshot
    fn obs_len(&self, player: &Player, state: &GameState) -> usize;

    /// Append the whole observation to `out`
    fn encode(&self, player: &Player, state: &GameState, out: &mut ObsWriter);

    /// Build the observation for `player`.
    ///
    /// Does not validate the snapshot: malformed physics propagates into the
    /// output (NaN in, NaN out). With the `strict_contracts` feature the
    /// snapshot is validated first and a violation panics.
    fn build(&self, player: &Player, state: &GameState) -> Observation {
        #[cfg(feature = "strict_contracts")]
        if let Err(e) = state.validate() {
            panic!("{} observation for car {}: {}", self.name(), player.car_id, e);
        }

        let len = self.obs_len(player, state);
        let mut out = ObsWriter::with_capacity(len);
        self.encode(player, state, &mut out);
        trace!(car_id = player.car_id, builder = self.name(), len = out.len(), "observation built");
        out.finish(len)
    }

    /// Validate the snapshot against its contract and this builder's config, then build.
    ///
    /// An observer missing from the roster is still built, with a warning.
    fn build_checked(&self, player: &Player, state: &GameState) -> Result<Observation> {
        state.validate()?;
        let expected = self.config().boost_pad_count;
        if state.boost_pad_count() != expected {
            return Err(ObsError::BoostTableSize { found: state.boost_pad_count(), expected });
        }
        if state.find_player(player.car_id).is_none() {
            warn!(car_id = player.car_id, builder = self.name(), "observer is not in the roster");
        }
        Ok(self.build(player, state))
    }

    /// Labelled segments of the observation `build` would produce
    fn layout(&self, player: &Player, state: &GameState) -> ObsLayout {
        let mut out = ObsWriter::recording(self.obs_len(player, state));
        self.encode(player, state, &mut out);
        out.into_layout()
    }
}

/// Build observations for every player in roster order.
///
/// Uses rayon when the `parallel` feature is on; the snapshot is shared read-only.
pub fn build_obs_all<B: ObservationBuilder + ?Sized>(builder: &B, state: &GameState) -> Vec<Observation> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        state.players.par_iter().map(|p| builder.build(p, state)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        state.players.iter().map(|p| builder.build(p, state)).collect()
    }
}
