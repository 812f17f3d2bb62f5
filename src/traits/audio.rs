use std::cell::RefCell;
use std::rc::Rc;

/// Abstraction over note playback.
/// Implementations: NoteBank (rodio), RecordingPlayer (testing).
pub trait NotePlayer {
    /// Play the sample at `note`. Callers only pass indices drawn from a
    /// validated sheet, so the index is always within the bank.
    fn play(&mut self, note: usize);
}

/// Player that discards every note. Stands in when no audio device is
/// available so the game runs silently instead of failing.
pub struct NullPlayer;

impl NotePlayer for NullPlayer {
    fn play(&mut self, _note: usize) {}
}

/// Records played notes for deterministic testing.
#[derive(Clone, Default)]
pub struct RecordingPlayer {
    played: Rc<RefCell<Vec<usize>>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<usize> {
        self.played.borrow().clone()
    }
}

impl NotePlayer for RecordingPlayer {
    fn play(&mut self, note: usize) {
        self.played.borrow_mut().push(note);
    }
}
