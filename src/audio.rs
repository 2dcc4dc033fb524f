//! Sound cues
//!
//! The simulation never touches an audio device. Each tick's events are
//! mapped to cues and handed to whatever sink the frontend provides.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Key picked up
    KeyPickup,
    /// Door swung open
    DoorUnlock,
    /// Caught by a dragon
    Death,
    /// Exit reached
    LevelComplete,
    /// Last level cleared
    Victory,
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::KeyCollected { .. } => Some(SoundEffect::KeyPickup),
            GameEvent::DoorUnlocked { .. } => Some(SoundEffect::DoorUnlock),
            GameEvent::Death => Some(SoundEffect::Death),
            GameEvent::LevelCompleted => Some(SoundEffect::LevelComplete),
            GameEvent::CampaignFinished => Some(SoundEffect::Victory),
            GameEvent::LevelAdvanced { .. } => None,
        }
    }
}

/// Something that can play a cue. Fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Play the cue for every event, in order
pub fn drain_events<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    events
        .iter()
        .filter_map(SoundEffect::for_event)
        .for_each(|effect| sink.play(effect));
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    muted: bool,
    played: u32,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Number of cues played while unmuted
    pub fn played(&self) -> u32 {
        self.played
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("Sound: {effect:?}");
    }
}
