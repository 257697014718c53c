//! Audio cue engine.
//!
//! rodio's output stream and sink are not Send, so a dedicated
//! `audio-engine` thread owns them and the handle talks to it over a
//! command channel. The thread is spawned lazily on first use.

pub mod cue;

use anyhow::{anyhow, Result};
use rodio::{OutputStream, Sink};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use crate::classifier::OsCategory;
use crate::theme::{theme_for, CueSpec};
use cue::CueTone;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

/// Volume the page played its cues at.
const DEFAULT_CUE_VOLUME: f32 = 0.7;
/// Bounded retries for opening the output device before a play command
/// is dropped.
const MAX_START_ATTEMPTS: u32 = 3;

enum CueCommand {
    Play(CueSpec),
    Stop,
    Pause,
    Resume,
    SetVolume(f32),
}

pub struct CueEngineHandle {
    tx: Arc<Mutex<Option<Sender<CueCommand>>>>,
    is_paused: Arc<AtomicBool>,
}

impl CueEngineHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            is_paused: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<CueCommand>> {
        let mut guard = self
            .tx
            .lock()
            .map_err(|_| anyhow!("cue engine handle poisoned"))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<CueCommand>();
        let is_paused = Arc::clone(&self.is_paused);

        // Dedicated thread holding the non-Send audio objects.
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;
                let mut volume = DEFAULT_CUE_VOLUME;

                fn open_sink() -> Result<(OutputStream, Sink)> {
                    let (stream, handle) = OutputStream::try_default()
                        .map_err(|err| anyhow!("no audio output stream: {err}"))?;
                    let sink =
                        Sink::try_new(&handle).map_err(|err| anyhow!("no audio sink: {err}"))?;
                    Ok((stream, sink))
                }

                while let Ok(command) = rx.recv() {
                    match command {
                        CueCommand::Play(spec) => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;

                            let mut opened = None;
                            for attempt in 1..=MAX_START_ATTEMPTS {
                                match open_sink() {
                                    Ok(pair) => {
                                        opened = Some(pair);
                                        break;
                                    }
                                    Err(err) => log_error!(
                                        "cue start attempt {attempt}/{MAX_START_ATTEMPTS} failed: {err}"
                                    ),
                                }
                            }
                            let Some((stream, new_sink)) = opened else {
                                continue;
                            };
                            new_sink.set_volume(volume);
                            new_sink.append(CueTone::new(spec));
                            new_sink.play();
                            _stream = Some(stream);
                            sink = Some(new_sink);
                            is_paused.store(false, Ordering::SeqCst);
                        }
                        CueCommand::Stop => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            _stream = None;
                            is_paused.store(false, Ordering::SeqCst);
                        }
                        CueCommand::Pause => {
                            if let Some(ref current) = sink {
                                current.pause();
                                is_paused.store(true, Ordering::SeqCst);
                            }
                        }
                        CueCommand::Resume => {
                            if let Some(ref current) = sink {
                                current.play();
                                is_paused.store(false, Ordering::SeqCst);
                            }
                        }
                        CueCommand::SetVolume(value) => {
                            volume = value.clamp(0.0, 1.0);
                            if let Some(ref current) = sink {
                                current.set_volume(volume);
                            }
                        }
                    }
                }
            })
            .map_err(|err| anyhow!("failed to spawn audio thread: {err}"))?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }

    fn send(&self, command: CueCommand) -> Result<()> {
        self.ensure_thread()?
            .send(command)
            .map_err(|_| anyhow!("audio thread is gone"))
    }

    /// Start the endless cue for the guessed OS. The category label is
    /// the only input the audio side takes from the classifier.
    pub fn play_for_os(&self, category: OsCategory) -> Result<()> {
        let theme = theme_for(category);
        log_info!("starting {} cue for {category}", theme.name);
        self.send(CueCommand::Play(theme.cue))
    }

    pub fn stop(&self) -> Result<()> {
        // Nothing to stop if the thread never started.
        if let Ok(guard) = self.tx.lock() {
            if let Some(tx) = guard.as_ref() {
                let _ = tx.send(CueCommand::Stop);
            }
        }
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        self.send(CueCommand::Pause)
    }

    pub fn resume(&self) -> Result<()> {
        self.send(CueCommand::Resume)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.send(CueCommand::SetVolume(volume))
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused.load(Ordering::SeqCst)
    }
}

impl Default for CueEngineHandle {
    fn default() -> Self {
        Self::new()
    }
}
