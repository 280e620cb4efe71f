pub mod chime;

use chime::Chime;

use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use crate::log_warn;

const ENABLE_LOGS: bool = true;

/// Plays the "spin finished" cue. Must not block the frame loop.
pub trait Sound {
    fn play(&self);
}

/// Counts plays instead of making noise.
#[derive(Debug, Default, Clone)]
pub struct CountingSound {
    plays: Arc<AtomicUsize>,
}

impl CountingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl Sound for CountingSound {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}

enum AudioCommand {
    Play,
    Stop,
}

/// rodio-backed chime. Device handles are not `Send`, so they live on a
/// dedicated thread that receives commands over a channel.
pub struct ChimeSound {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
    file: Option<PathBuf>,
}

impl ChimeSound {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            file,
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let file = self.file.clone();

        thread::Builder::new()
            .name("wheel-audio".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Play => {
                            if let Err(e) = ensure_sink(&mut _stream, &mut sink) {
                                log_warn!("{}", e);
                                continue;
                            }
                            let Some(ref s) = sink else { continue };
                            // Restart rather than queue behind a previous chime
                            s.stop();
                            match &file {
                                Some(path) => match open_file(path) {
                                    Ok(decoder) => s.append(decoder),
                                    Err(e) => {
                                        log_warn!("{}; falling back to chime", e);
                                        s.append(Chime::default());
                                    }
                                },
                                None => s.append(Chime::default()),
                            }
                            s.play();
                        }
                        AudioCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    pub fn stop(&self) {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AudioCommand::Stop);
        }
    }
}

impl Sound for ChimeSound {
    fn play(&self) {
        let sent = self
            .ensure_thread()
            .and_then(|tx| tx.send(AudioCommand::Play).map_err(|e| e.to_string()));
        if let Err(e) = sent {
            log_warn!("Failed to play chime: {}", e);
        }
    }
}

impl Drop for ChimeSound {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_file(path: &Path) -> Result<Decoder<BufReader<File>>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open sound file {}: {}", path.display(), e))?;
    Decoder::new(BufReader::new(file))
        .map_err(|e| format!("Failed to decode sound file {}: {}", path.display(), e))
}
