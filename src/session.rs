//! Session controller
//!
//! Owns the game status state machine and the run timer. The simulation only
//! reports outcomes; this is the one place status actually changes.

use crate::score::calculate_points;
use crate::sim::{Level, SimState, StepOutcome, TickInput, tick};
use crate::tuning::Tuning;

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Title screen, nothing simulated yet
    #[default]
    Start,
    Playing,
    Won,
    Lost,
}

/// Result of a won run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionData {
    /// Seconds spent playing
    pub completion_time: f64,
    pub points: i64,
}

/// A level being played, restarted and scored
#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    tuning: Tuning,
    sim: SimState,
    status: GameStatus,
    /// Timestamp (seconds) the current run started
    started_at: f64,
    /// Timestamp (seconds) the current run ended, if it has
    ended_at: Option<f64>,
    completion: Option<CompletionData>,
}

impl Session {
    /// Create a session on the title screen. Returns None if the level has no
    /// start marker.
    pub fn new(level: Level, tuning: Tuning) -> Option<Self> {
        let sim = SimState::new(&level)?;
        Some(Self {
            level,
            tuning,
            sim,
            status: GameStatus::Start,
            started_at: 0.0,
            ended_at: None,
            completion: None,
        })
    }

    /// Begin (or restart) a run at time `now` (seconds).
    ///
    /// Player and monsters are rebuilt from the level, so restarting from any
    /// status gives the same initial state.
    pub fn start(&mut self, now: f64) {
        if let Some(sim) = SimState::new(&self.level) {
            self.sim = sim;
        }
        self.status = GameStatus::Playing;
        self.started_at = now;
        self.ended_at = None;
        self.completion = None;
        log::info!("Run started");
    }

    /// Run one simulation frame if playing and apply its outcome.
    pub fn frame(&mut self, input: &TickInput, jump_modifier: f32, now: f64) -> StepOutcome {
        if self.status != GameStatus::Playing {
            return StepOutcome::None;
        }

        let outcome = tick(
            &mut self.sim,
            &self.level,
            input,
            &self.tuning,
            jump_modifier,
        );

        match outcome {
            StepOutcome::None => {}
            StepOutcome::Won => {
                let completion_time = now - self.started_at;
                let points = calculate_points(completion_time);
                self.status = GameStatus::Won;
                self.ended_at = Some(now);
                self.completion = Some(CompletionData {
                    completion_time,
                    points,
                });
                log::info!("Level complete in {:.2}s for {} points", completion_time, points);
            }
            StepOutcome::Lost => {
                self.status = GameStatus::Lost;
                self.ended_at = Some(now);
                log::info!(
                    "Run lost after {:.2}s at ({:.0}, {:.0})",
                    now - self.started_at,
                    self.sim.player.pos.x,
                    self.sim.player.pos.y
                );
            }
        }

        outcome
    }

    /// Seconds elapsed in the current run, frozen once it ends
    pub fn elapsed(&self, now: f64) -> f64 {
        match self.status {
            GameStatus::Start => 0.0,
            GameStatus::Playing => now - self.started_at,
            GameStatus::Won | GameStatus::Lost => {
                self.ended_at.unwrap_or(now) - self.started_at
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn completion(&self) -> Option<CompletionData> {
        self.completion
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EntityKind, LevelEntity};

    fn entity(id: &str, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> LevelEntity {
        LevelEntity {
            id: id.into(),
            x,
            y,
            w,
            h,
            kind,
        }
    }

    /// Floor with the goal a short walk to the right
    fn short_level(goal_x: f32) -> Level {
        Level {
            width: 1000.0,
            height: 800.0,
            entities: vec![
                entity("start", EntityKind::Start, 50.0, 352.0, 0.0, 0.0),
                entity("floor", EntityKind::Platform, 0.0, 400.0, 1000.0, 50.0),
                entity("goal", EntityKind::Goal, goal_x, 300.0, 50.0, 100.0),
            ],
        }
    }

    fn right() -> TickInput {
        TickInput {
            move_right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut session = Session::new(short_level(300.0), Tuning::default()).unwrap();
        assert_eq!(session.status(), GameStatus::Start);
        let before = session.sim().clone();
        assert_eq!(session.frame(&right(), 1.0, 1.0), StepOutcome::None);
        assert_eq!(session.sim(), &before);
        assert_eq!(session.elapsed(5.0), 0.0);
    }

    #[test]
    fn test_win_records_completion() {
        let mut session = Session::new(short_level(300.0), Tuning::default()).unwrap();
        session.start(100.0);
        assert_eq!(session.status(), GameStatus::Playing);

        let mut now = 100.0;
        while session.status() == GameStatus::Playing {
            now += 1.0 / 60.0;
            session.frame(&right(), 1.0, now);
            assert!(now < 200.0, "goal never reached");
        }

        assert_eq!(session.status(), GameStatus::Won);
        let completion = session.completion().unwrap();
        assert!((completion.completion_time - (now - 100.0)).abs() < 1e-9);
        assert_eq!(completion.points, calculate_points(completion.completion_time));
        // Timer is frozen after the run ends
        assert_eq!(session.elapsed(now + 30.0), completion.completion_time);
        // No further simulation once won
        assert_eq!(session.frame(&right(), 1.0, now + 1.0), StepOutcome::None);
    }

    #[test]
    fn test_loss_has_no_completion() {
        let mut level = short_level(900.0);
        level.entities.insert(
            2,
            entity("spikes", EntityKind::Hazard, 150.0, 380.0, 40.0, 20.0),
        );
        let mut session = Session::new(level, Tuning::default()).unwrap();
        session.start(0.0);

        let mut now = 0.0;
        while session.status() == GameStatus::Playing && now < 60.0 {
            now += 1.0 / 60.0;
            session.frame(&right(), 1.0, now);
        }
        assert_eq!(session.status(), GameStatus::Lost);
        assert!(session.completion().is_none());
    }

    #[test]
    fn test_restart_clears_completion_and_rebuilds_state() {
        let mut session = Session::new(short_level(300.0), Tuning::default()).unwrap();
        session.start(0.0);
        let initial = session.sim().clone();

        let mut now = 0.0;
        while session.status() == GameStatus::Playing && now < 60.0 {
            now += 1.0 / 60.0;
            session.frame(&right(), 1.0, now);
        }
        assert!(session.completion().is_some());

        session.start(now);
        assert_eq!(session.status(), GameStatus::Playing);
        assert!(session.completion().is_none());
        assert_eq!(session.sim(), &initial);
        assert!((session.elapsed(now + 2.0) - 2.0).abs() < 1e-9);
    }
}
