use crate::config;
use crate::traits::audio::NotePlayer;
use log::{info, warn};
use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type NoteSource = Buffered<Decoder<BufReader<File>>>;

/// Pre-buffered bank of the playable note samples.
///
/// Every wav is opened and decoded once at startup; playback clones the
/// buffered source into a detached sink so overlapping notes mix freely.
pub struct NoteBank {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    notes: Vec<NoteSource>,
}

impl NoteBank {
    pub fn load(dir: &Path) -> Result<Self, Box<dyn Error>> {
        info!("Initializing note bank from {:?}...", dir);
        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| format!("Failed to get default audio output stream: {}", e))?;

        let mut notes = Vec::with_capacity(config::NOTE_FILES.len());
        for name in config::NOTE_FILES {
            let path = dir.join(name);
            let file =
                File::open(&path).map_err(|e| format!("Failed to open note {:?}: {}", path, e))?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| format!("Failed to decode note {:?}: {}", path, e))?;
            notes.push(source.buffered());
        }

        info!("Note bank ready ({} samples).", notes.len());
        Ok(NoteBank {
            _stream,
            stream_handle,
            notes,
        })
    }
}

impl NotePlayer for NoteBank {
    fn play(&mut self, note: usize) {
        let Some(source) = self.notes.get(note) else {
            warn!("Attempted to play unloaded note {}", note);
            return;
        };
        match Sink::try_new(&self.stream_handle) {
            Ok(sink) => {
                sink.append(source.clone());
                sink.detach();
            }
            Err(e) => warn!("Failed to create sink for note {}: {}", note, e),
        }
    }
}
