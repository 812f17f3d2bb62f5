// src/game/scheduler.rs
//! Per-tick tile advancement and spawning.

use crate::config;
use crate::game::lane;
use crate::game::session::{PendingHit, Session};
use log::debug;
use rand::Rng;

/// Advances the run by one frame.
///
/// Misses are judged first: a tile already past the bottom edge ends the
/// run before any offset moves, so a tile caught exactly on the boundary is
/// never advanced again. After that, one spawn attempt may run for the
/// active spawn lane, and every descending tile steps by the current
/// level's advance.
pub fn tick(session: &mut Session) {
    if !session.running {
        return;
    }

    if session.lanes.iter().any(|l| l.is_past()) {
        session.end();
        return;
    }

    for index in 0..config::LANE_COUNT {
        if session.lanes[index].is_descending() || index == session.spawn_lane {
            if index == session.spawn_lane
                && (session.lanes[index].y >= 0.0 || session.pending.is_empty())
            {
                // The spawn lane's tile has fully entered the viewport, or
                // everything pending has been resolved; hand the spawn role
                // onward instead of moving this lane.
                try_spawn(session);
                continue;
            }
            session.lanes[index].y += session.policy.advance(session.speed_level);
        }
    }
}

/// Promotes the next lane in rotation to spawn lane, provided it is parked;
/// otherwise the spawn stays deferred until a later tick. The fresh tile is
/// drawn in the column of a uniformly random target lane, and it is that
/// target's key the player must press. The speed level is recomputed here,
/// so a threshold crossed mid-pass takes effect with the next tile.
fn try_spawn(session: &mut Session) {
    let next = (session.spawn_lane + 1) % config::LANE_COUNT;
    if !session.lanes[next].is_parked() {
        return;
    }
    session.spawn_lane = next;
    let target = session.rng.random_range(0..config::LANE_COUNT);
    session.lanes[next].x = lane::origin_x(target);
    session.pending.push_back(PendingHit {
        target_lane: target,
        tile_lane: next,
    });
    session.speed_level = session.policy.level_for(session.score);
    debug!(
        "Spawned tile in lane {} targeting lane {} (speed level {})",
        next, target, session.speed_level
    );
}
