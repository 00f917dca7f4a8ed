//! Per-shoebill animation state machine with timed cross-fades.

use crate::scene::ShoebillClips;

/// Clip a shoebill is (primarily) playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimState {
    Idle,
    Walk,
    Fly,
    FlyEnd,
}

/// Gameplay events the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimTrigger {
    /// The opening sequence finished.
    OpeningEnded,
    /// A flier got within arrival distance of its landing spot.
    ReachedDestination,
    /// A landing flier touched the ground.
    Landed,
}

impl AnimState {
    /// Target state and fade seconds for a trigger, or None if the trigger
    /// means nothing in this state.
    pub fn transition(self, trigger: AnimTrigger) -> Option<(AnimState, f32)> {
        match (self, trigger) {
            (AnimState::Idle, AnimTrigger::OpeningEnded) => Some((AnimState::Walk, 1.0)),
            (AnimState::Fly, AnimTrigger::ReachedDestination) => Some((AnimState::FlyEnd, 1.0)),
            (AnimState::FlyEnd, AnimTrigger::Landed) => Some((AnimState::Idle, 3.0)),
            _ => None,
        }
    }

    /// FlyEnd plays once and holds its last pose.
    pub fn loops(self) -> bool {
        !matches!(self, AnimState::FlyEnd)
    }

    fn duration(self, clips: &ShoebillClips) -> f32 {
        match self {
            AnimState::Idle => clips.idle,
            AnimState::Walk => clips.walk,
            AnimState::Fly => clips.fly,
            AnimState::FlyEnd => clips.fly_end,
        }
    }
}

/// One playing clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Action {
    pub state: AnimState,
    pub time: f32,
    pub duration: f32,
    finished: bool,
}

impl Action {
    fn new(state: AnimState, clips: &ShoebillClips) -> Self {
        Self {
            state,
            time: 0.0,
            duration: state.duration(clips),
            finished: false,
        }
    }

    /// Returns (loops completed, finished on this step).
    fn advance(&mut self, dt: f32) -> (u32, bool) {
        if self.duration <= 0.0 || self.finished {
            return (0, false);
        }
        self.time += dt;
        if !self.state.loops() {
            if self.time >= self.duration {
                self.time = self.duration;
                self.finished = true;
                return (0, true);
            }
            return (0, false);
        }
        if self.time < self.duration {
            return (0, false);
        }
        let loops = ((self.time / self.duration) as u32).max(1);
        self.time %= self.duration;
        (loops, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CrossFade {
    from: Action,
    elapsed: f32,
    duration: f32,
}

/// Result of advancing an animator by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimatorStep {
    /// Loops the primary action completed this frame.
    pub loops_completed: u32,
    /// The primary action is one-shot and reached its end this frame.
    pub finished: bool,
}

/// Primary action plus at most one outgoing action being faded out.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    current: Action,
    fade: Option<CrossFade>,
}

impl Animator {
    pub fn new(state: AnimState, clips: &ShoebillClips) -> Self {
        Self {
            current: Action::new(state, clips),
            fade: None,
        }
    }

    pub fn state(&self) -> AnimState {
        self.current.state
    }

    pub fn current(&self) -> &Action {
        &self.current
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Advance every playing action.
    pub fn update(&mut self, dt: f32) -> AnimatorStep {
        let dt = dt.max(0.0);
        if let Some(fade) = &mut self.fade {
            fade.from.advance(dt);
            fade.elapsed += dt;
            if fade.elapsed >= fade.duration {
                self.fade = None;
            }
        }
        let (loops_completed, finished) = self.current.advance(dt);
        AnimatorStep {
            loops_completed,
            finished,
        }
    }

    /// Apply a trigger. Returns true if it started a transition.
    ///
    /// Transitions are guarded on the current state, so repeating a trigger is
    /// a no-op. A transition started mid-fade retires the older outgoing action.
    pub fn trigger(&mut self, trigger: AnimTrigger, clips: &ShoebillClips) -> bool {
        let Some((next, fade)) = self.current.state.transition(trigger) else {
            return false;
        };
        let from = std::mem::replace(&mut self.current, Action::new(next, clips));
        self.fade = if fade > 0.0 {
            Some(CrossFade {
                from,
                elapsed: 0.0,
                duration: fade,
            })
        } else {
            None
        };
        true
    }

    /// Blend weights of the playing actions, primary first. Weights sum to 1.
    pub fn weights(&self) -> Vec<(AnimState, f32)> {
        match &self.fade {
            Some(fade) => {
                let t = (fade.elapsed / fade.duration).clamp(0.0, 1.0);
                vec![(self.current.state, t), (fade.from.state, 1.0 - t)]
            }
            None => vec![(self.current.state, 1.0)],
        }
    }
}
