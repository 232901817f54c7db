//! Shared fixtures for unit tests

use nalgebra::Vector3;

use crate::engine::game_state::{GameState, Player};
use crate::engine::physics_constants::boost_pads;
use crate::engine::types::{PhysState, PrevAction, RotMat, Team};

pub fn pads_all_up() -> Vec<bool> {
    vec![true; boost_pads::COUNT]
}

/// Player with non-trivial physics, derived from `seed` so every car differs.
pub fn sample_player(car_id: u32, team: Team, seed: f32) -> Player {
    let side = if team == Team::Blue { -1.0 } else { 1.0 };
    let phys = PhysState::at(Vector3::new(300.0 * seed - 900.0, side * (1500.0 + 200.0 * seed), 17.0 + seed))
        .with_vel(Vector3::new(150.0 * seed, -side * 900.0, 10.0 * seed))
        .with_ang_vel(Vector3::new(0.1 * seed, -0.3, 1.5 - 0.2 * seed))
        .with_rot_mat(RotMat::from_euler(0.05 * seed, 0.7 * seed + side, 0.02 * seed));

    let mut player = Player::new(car_id, team, phys);
    player.boost = 10.0 * seed;
    player.on_ground = car_id % 2 == 0;
    player.has_jumped = car_id % 3 == 1;
    player.prev_action = PrevAction([1.0, -0.5, 0.25, 0.0, -1.0, 0.0, 1.0, 0.0]);
    player
}

/// Ball in motion, `n_blue` blue cars (ids 0..) then `n_orange` orange cars.
pub fn sample_state(n_blue: usize, n_orange: usize) -> GameState {
    let ball = PhysState::at(Vector3::new(250.0, -800.0, 320.0))
        .with_vel(Vector3::new(-400.0, 1200.0, 150.0))
        .with_ang_vel(Vector3::new(1.0, -2.0, 0.5));

    let mut players = Vec::with_capacity(n_blue + n_orange);
    for i in 0..n_blue {
        players.push(sample_player(i as u32, Team::Blue, 1.0 + i as f32));
    }
    for i in 0..n_orange {
        let id = (n_blue + i) as u32;
        players.push(sample_player(id, Team::Orange, 2.5 + i as f32));
    }

    let mut timers = vec![0.0; boost_pads::COUNT];
    let mut pads = pads_all_up();
    pads[3] = false;
    timers[3] = 6.0;
    pads[20] = false;
    timers[20] = 0.5;

    GameState::new(ball, players, pads, timers)
}

/// The same match seen from the other side: every body mirrored, teams swapped.
pub fn mirrored(state: &GameState) -> GameState {
    let players = state
        .players
        .iter()
        .map(|p| {
            let mut m = p.clone();
            m.phys = p.phys.invert();
            m.team = p.team.opposite();
            m
        })
        .collect();
    let pads = state.boost_pads(true).to_vec();
    let timers = state.boost_pad_timers(true).to_vec();
    GameState::new(state.ball.invert(), players, pads, timers)
}

pub fn assert_close(a: &[f32], b: &[f32], tol: f32) {
    assert_eq!(a.len(), b.len(), "length mismatch");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).abs() <= tol, "index {}: {} vs {}", i, x, y);
    }
}
