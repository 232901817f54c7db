//! obs_cli helpers
//!
//! Snapshot/config loading and the JSON shapes printed by the `obs_cli` binary.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use tracing::info;

use obs_core::engine::observation::{ObsBuilderKind, PLAYER_FIELDS, PLAYER_OBS_LEN};
use obs_core::{GameState, ObsConfig, ObsLayout, Observation, ObservationBuilder, PrevAction};

/// Config from `path`, or the default config
pub fn load_config(path: Option<&Path>) -> Result<ObsConfig> {
    match path {
        Some(p) => ObsConfig::load(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(ObsConfig::default()),
    }
}

/// Snapshot from `path`, rejected unless it passes `GameState::validate`.
pub fn load_state(path: &Path) -> Result<GameState> {
    let state = GameState::load(path).with_context(|| format!("loading snapshot {}", path.display()))?;
    state.validate().with_context(|| format!("invalid snapshot {}", path.display()))?;
    info!(
        path = %path.display(),
        tick = state.tick_count,
        players = state.players.len(),
        pads = state.boost_pad_count(),
        "snapshot loaded"
    );
    Ok(state)
}

pub fn make_builder(name: &str, config: ObsConfig) -> Result<ObsBuilderKind> {
    Ok(ObsBuilderKind::from_name(name, config)?)
}

/// Checked build for one car of the snapshot
pub fn build_for(builder: &ObsBuilderKind, state: &GameState, car_id: u32) -> Result<Observation> {
    let player = state.player(car_id)?;
    let obs = builder
        .build_checked(player, state)
        .with_context(|| format!("building {} observation for car {}", builder.name(), car_id))?;
    Ok(obs)
}

fn is_player_block(label: &str, len: usize) -> bool {
    len == PLAYER_OBS_LEN && (label == "self" || label.starts_with("teammate[") || label.starts_with("opponent["))
}

/// Observation as an ordered list of labelled segments.
///
/// Player blocks and the previous action are split further into their named fields.
pub fn labelled(obs: &Observation, layout: &ObsLayout) -> Value {
    let segments: Vec<Value> = layout
        .segments
        .iter()
        .filter_map(|seg| {
            let values = obs.segment(seg)?;
            let body = if is_player_block(&seg.label, seg.len) {
                let mut fields = Map::new();
                let mut offset = 0;
                for (name, width) in PLAYER_FIELDS {
                    fields.insert(name.to_owned(), json!(&values[offset..offset + width]));
                    offset += width;
                }
                Value::Object(fields)
            } else if seg.label == "prev_action" && seg.len == PrevAction::LABELS.len() {
                let fields: Map<String, Value> = PrevAction::LABELS
                    .iter()
                    .zip(values)
                    .map(|(name, v)| (name.to_string(), json!(v)))
                    .collect();
                Value::Object(fields)
            } else {
                json!(values)
            };
            Some(json!({ "label": seg.label, "offset": seg.offset, "values": body }))
        })
        .collect();
    Value::Array(segments)
}

/// Which document `obs_cli schema` describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTarget {
    State,
    Config,
}

pub fn schema_json(target: SchemaTarget) -> Result<String> {
    let schema = match target {
        SchemaTarget::State => schemars::schema_for!(GameState),
        SchemaTarget::Config => schemars::schema_for!(ObsConfig),
    };
    Ok(serde_json::to_string_pretty(&schema)?)
}
