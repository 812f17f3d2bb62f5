// src/game/judge.rs
//! Press/release verification against the pending-hit queue.

use crate::game::lane::{self, GuideState};
use crate::game::session::Session;
use winit::keyboard::KeyCode;

/// Acts on the leading edge of a physical press. A key already in the held
/// set is a repeat and is dropped outright; keys outside the lane alphabet
/// only register in the held set. A mapped press during a run consumes the
/// oldest pending hit: the matching lane scores and parks its tile, any
/// other lane ends the run. The entry is never requeued.
pub fn key_down(session: &mut Session, code: KeyCode) {
    if !session.held.insert(code) {
        return;
    }
    let Some(pressed) = lane::lane_from_keycode(code) else {
        return;
    };
    if !session.running {
        return;
    }
    session.guides[pressed] = GuideState::Held;
    let Some(hit) = session.pending.pop_front() else {
        return;
    };
    if hit.target_lane == pressed {
        session.lanes[hit.tile_lane].park();
        session.score += 1;
    } else {
        session.end();
    }
}

/// Releases always leave the held set. For mapped keys, the first release
/// after construction or after a fail highlight only clears the one-shot
/// guard. Later releases restore the idle guide while running, paint the
/// fail guide once the run has ended, and forward the next sheet note to
/// the audio collaborator.
pub fn key_up(session: &mut Session, code: KeyCode) {
    session.held.remove(&code);
    let Some(released) = lane::lane_from_keycode(code) else {
        return;
    };
    if session.first_highlight {
        session.first_highlight = false;
        return;
    }
    if session.running {
        session.guides[released] = GuideState::Idle;
    } else {
        session.guides[released] = GuideState::Fail;
        session.first_highlight = true;
    }
    if let Some(sheet) = &session.sheet {
        let note = sheet.note_at(sheet.position_for(session.score));
        session.audio.play(note);
    }
}
