// src/game/session.rs
use crate::config;
use crate::game::lane::{self, GuideState, Lane};
use crate::game::sheet::{NoteSheet, SheetError};
use crate::game::speed::SpeedPolicy;
use crate::game::{judge, scheduler};
use crate::traits::audio::NotePlayer;
use crate::traits::tick::TickHandle;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};
use winit::keyboard::KeyCode;

/// Oldest-first record of a spawned tile awaiting resolution.
///
/// `target_lane` names the lane whose key must be pressed; `tile_lane` is
/// the lane whose rectangle is actually descending. Judging goes strictly
/// by queue order, never by which tile looks closest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingHit {
    pub target_lane: usize,
    pub tile_lane: usize,
}

/// One game session: every piece of run state plus the collaborators the
/// engine commands. Constructed once per window (or per test) so nothing
/// lives in globals.
pub struct Session {
    pub lanes: [Lane; config::LANE_COUNT],
    pub guides: [GuideState; config::LANE_COUNT],
    pub pending: VecDeque<PendingHit>,
    pub held: HashSet<KeyCode>,
    pub score: u32,
    pub hi_score: u32,
    pub running: bool,
    pub speed_level: usize,
    pub spawn_lane: usize,
    /// One-shot release guard, set at construction and again after a fail
    /// indicator is painted.
    pub first_highlight: bool,
    pub policy: SpeedPolicy,
    pub sheet: Option<NoteSheet>,
    pub rng: StdRng,
    pub audio: Box<dyn NotePlayer>,
    pub ticker: Box<dyn TickHandle>,
}

impl Session {
    pub fn new(policy: SpeedPolicy, audio: Box<dyn NotePlayer>, ticker: Box<dyn TickHandle>) -> Self {
        Self::from_rng(policy, audio, ticker, StdRng::from_os_rng())
    }

    /// Deterministic constructor for tests and replays.
    pub fn with_seed(
        policy: SpeedPolicy,
        audio: Box<dyn NotePlayer>,
        ticker: Box<dyn TickHandle>,
        seed: u64,
    ) -> Self {
        Self::from_rng(policy, audio, ticker, StdRng::seed_from_u64(seed))
    }

    fn from_rng(
        policy: SpeedPolicy,
        audio: Box<dyn NotePlayer>,
        ticker: Box<dyn TickHandle>,
        rng: StdRng,
    ) -> Self {
        Self {
            lanes: std::array::from_fn(Lane::new),
            guides: [GuideState::Idle; config::LANE_COUNT],
            pending: VecDeque::new(),
            held: HashSet::new(),
            score: 0,
            hi_score: 0,
            running: false,
            speed_level: 0,
            spawn_lane: 0,
            first_highlight: true,
            policy,
            sheet: None,
            rng,
            audio,
            ticker,
        }
    }

    /// Resets every per-run structure atomically and starts the tick
    /// source. The pending queue comes up empty; the first tile spawns on
    /// the first tick.
    pub fn restart(&mut self) {
        for lane_state in &mut self.lanes {
            lane_state.x = lane::origin_x(lane_state.index);
            lane_state.park();
        }
        self.guides = [GuideState::Idle; config::LANE_COUNT];
        self.pending.clear();
        self.held.clear();
        self.score = 0;
        self.speed_level = 0;
        self.spawn_lane = 0;
        self.first_highlight = false;
        self.running = true;
        self.ticker.start();
        info!("Run started");
    }

    /// Stops the run and folds the score into the high score. Safe to call
    /// again on an ended session; only the max comparison re-runs.
    pub fn end(&mut self) {
        if self.running {
            info!("Run ended at score {}", self.score);
        }
        self.running = false;
        if self.score > self.hi_score {
            self.hi_score = self.score;
        }
        self.ticker.stop();
    }

    /// Advances the run by one frame.
    pub fn tick(&mut self) {
        scheduler::tick(self);
    }

    pub fn key_down(&mut self, code: KeyCode) {
        judge::key_down(self, code);
    }

    pub fn key_up(&mut self, code: KeyCode) {
        judge::key_up(self, code);
    }

    /// Replaces the loaded sheet with the parsed contents of `data`. The
    /// previous sheet is discarded up front, so a failed load always leaves
    /// the no-sheet state behind.
    pub fn load_sheet(&mut self, data: &[u8], name: &str) -> Result<(), SheetError> {
        self.sheet = None;
        let sheet = NoteSheet::from_bytes(data, name, config::NOTE_COUNT)?;
        info!("Loaded sheet '{}' with {} notes", name, sheet.len());
        self.sheet = Some(sheet);
        Ok(())
    }

    pub fn sheet_status(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("Loaded {}", sheet.name()),
            None => "No sheet loaded".to_string(),
        }
    }

    /// Immutable view of the frame the renderer draws from.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lanes: std::array::from_fn(|i| LaneView {
                x: self.lanes[i].x,
                y: self.lanes[i].y,
                guide: self.guides[i],
            }),
            score: self.score,
            hi_score: self.hi_score,
            running: self.running,
            speed_level: self.speed_level,
            sheet_status: self.sheet_status(),
        }
    }
}

/// Per-lane slice of a [`Snapshot`].
#[derive(Clone, Copy, Debug)]
pub struct LaneView {
    pub x: f32,
    pub y: f32,
    pub guide: GuideState,
}

/// Everything presentation code may observe about a session. Handed out by
/// value each frame; mutating it changes nothing in the engine.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub lanes: [LaneView; config::LANE_COUNT],
    pub score: u32,
    pub hi_score: u32,
    pub running: bool,
    pub speed_level: usize,
    pub sheet_status: String,
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::traits::audio::RecordingPlayer;
    use crate::traits::tick::MockTicker;

    /// Session wired to recording doubles and a fixed seed.
    pub(crate) fn session_with_doubles() -> (Session, RecordingPlayer, MockTicker) {
        let audio = RecordingPlayer::new();
        let ticker = MockTicker::new();
        let session = Session::with_seed(
            SpeedPolicy::standard(),
            Box::new(audio.clone()),
            Box::new(ticker.clone()),
            7,
        );
        (session, audio, ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::session_with_doubles;
    use super::*;

    #[test]
    fn restart_resets_every_run_structure() {
        let (mut session, _audio, ticker) = session_with_doubles();
        session.restart();
        session.pending.push_back(PendingHit {
            target_lane: 1,
            tile_lane: 0,
        });
        session.lanes[0].y = 120.0;
        session.held.insert(KeyCode::KeyD);
        session.score = 6;
        session.guides[2] = GuideState::Fail;

        session.restart();
        assert_eq!(session.score, 0);
        assert!(session.running);
        assert!(session.pending.is_empty());
        assert!(session.held.is_empty());
        assert!(session.lanes.iter().all(|l| l.is_parked()));
        assert!(session.guides.iter().all(|g| *g == GuideState::Idle));
        assert_eq!(session.speed_level, 0);
        assert!(!session.first_highlight);
        assert!(ticker.is_active());
        assert_eq!(ticker.starts(), 2);
    }

    #[test]
    fn end_updates_high_score_and_stops_the_ticker() {
        let (mut session, _audio, ticker) = session_with_doubles();
        session.restart();
        session.score = 4;
        session.end();
        assert!(!session.running);
        assert_eq!(session.hi_score, 4);
        assert!(!ticker.is_active());

        // Ending again only re-runs the max comparison.
        session.score = 2;
        session.end();
        assert_eq!(session.hi_score, 4);
    }

    #[test]
    fn high_score_survives_restarts() {
        let (mut session, _audio, _ticker) = session_with_doubles();
        session.restart();
        session.score = 9;
        session.end();
        session.restart();
        assert_eq!(session.score, 0);
        assert_eq!(session.hi_score, 9);
    }

    #[test]
    fn failed_sheet_load_discards_the_previous_sheet() {
        let (mut session, _audio, _ticker) = session_with_doubles();
        assert!(session.load_sheet(b"0 1 2", "good.txt").is_ok());
        assert_eq!(session.sheet_status(), "Loaded good.txt");

        assert!(session.load_sheet(b"0 1 99", "bad.txt").is_err());
        assert!(session.sheet.is_none());
        assert_eq!(session.sheet_status(), "No sheet loaded");
    }

    #[test]
    fn sheet_lifecycle_is_independent_of_runs() {
        let (mut session, _audio, _ticker) = session_with_doubles();
        session.load_sheet(b"5 3 8", "demo.txt").unwrap();
        session.restart();
        session.end();
        session.restart();
        assert_eq!(session.sheet_status(), "Loaded demo.txt");
    }

    #[test]
    fn snapshot_mirrors_lane_and_run_state() {
        let (mut session, _audio, _ticker) = session_with_doubles();
        session.restart();
        session.lanes[1].x = 300.0;
        session.lanes[1].y = 42.0;
        session.guides[1] = GuideState::Held;
        session.score = 3;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.lanes[1].x, 300.0);
        assert_eq!(snapshot.lanes[1].y, 42.0);
        assert_eq!(snapshot.lanes[1].guide, GuideState::Held);
        assert_eq!(snapshot.score, 3);
        assert!(snapshot.running);
    }
}
