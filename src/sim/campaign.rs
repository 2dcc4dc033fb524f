//! Level progression
//!
//! Plays an ordered list of levels in one frame, moving on whenever the exit
//! is reached.

use std::sync::Arc;

use serde::Serialize;

use super::layout::{Frame, LayoutError, LevelLayout};
use super::state::{GameEvent, LevelState};
use super::tick::{TickInput, tick};
use crate::settings::Settings;

/// Phase of the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CampaignPhase {
    Playing,
    /// Every level completed
    Finished,
}

/// Run statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CampaignStats {
    pub ticks: u64,
    pub deaths: u32,
    pub levels_completed: usize,
}

/// A sequence of levels played in order
#[derive(Debug, Clone)]
pub struct Campaign {
    levels: Vec<Arc<LevelLayout>>,
    frame: Frame,
    settings: Settings,
    index: usize,
    level: LevelState,
    pub phase: CampaignPhase,
    pub stats: CampaignStats,
}

impl Campaign {
    /// Validate every layout up front and start the first one
    pub fn new(
        levels: Vec<LevelLayout>,
        frame: Frame,
        settings: Settings,
    ) -> Result<Self, LayoutError> {
        let levels: Vec<Arc<LevelLayout>> = levels.into_iter().map(Arc::new).collect();
        for layout in &levels {
            layout.validate()?;
        }
        let first = levels.first().cloned().ok_or(LayoutError::NoLevels)?;
        let level = LevelState::new(first, frame, &settings)?;

        log::info!("Campaign of {} levels started", levels.len());
        Ok(Self {
            levels,
            frame,
            settings,
            index: 0,
            level,
            phase: CampaignPhase::Playing,
            stats: CampaignStats::default(),
        })
    }

    /// Advance one tick, returning this tick's events
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase == CampaignPhase::Finished {
            return events;
        }

        self.stats.ticks += 1;
        tick(&mut self.level, input, &mut events);

        if events.contains(&GameEvent::Death) {
            self.stats.deaths += 1;
        }
        if self.level.is_completed() {
            self.stats.levels_completed += 1;
            self.advance(&mut events);
        }
        events
    }

    fn advance(&mut self, events: &mut Vec<GameEvent>) {
        let Some(next) = self.levels.get(self.index + 1).cloned() else {
            log::info!(
                "Campaign finished in {} ticks with {} deaths",
                self.stats.ticks,
                self.stats.deaths
            );
            self.phase = CampaignPhase::Finished;
            events.push(GameEvent::CampaignFinished);
            return;
        };

        // Validated in `new`
        match LevelState::new(next, self.frame, &self.settings) {
            Ok(level) => {
                self.index += 1;
                self.level = level;
                events.push(GameEvent::LevelAdvanced { index: self.index });
            }
            Err(e) => {
                log::error!("Skipping to the end, next level failed to build: {e}");
                self.phase = CampaignPhase::Finished;
                events.push(GameEvent::CampaignFinished);
            }
        }
    }

    /// The level currently in play (the last one once finished)
    pub fn level(&self) -> &LevelState {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == CampaignPhase::Finished
    }

    /// Play time in seconds at the configured tick rate
    pub fn elapsed_secs(&self) -> f32 {
        self.stats.ticks as f32 * self.settings.tick_dt()
    }
}
