//! UI signals the host displays: score, game over and music volume.

/// A value plus a dirty flag the host drains after redrawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signal<T> {
    value: T,
    changed: bool,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    /// Store `value`, marking the signal changed only if it differs.
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.changed = true;
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// The value if it changed since the last call.
    pub fn take_changed(&mut self) -> Option<&T> {
        if std::mem::take(&mut self.changed) {
            Some(&self.value)
        } else {
            None
        }
    }
}

/// Everything the core tells the page around it.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSignals {
    pub score: Signal<u32>,
    pub game_over: Signal<bool>,
    /// Background music volume, 0..1. Silent until the opening ends.
    pub music_volume: Signal<f32>,
}

impl HudSignals {
    pub fn new(initial_volume: f32) -> Self {
        Self {
            score: Signal::new(0),
            game_over: Signal::new(false),
            music_volume: Signal::new(initial_volume),
        }
    }

    pub fn add_score(&mut self, points: u32) {
        let total = self.score.get().saturating_add(points);
        self.score.set(total);
    }

    /// Human-readable status line.
    pub fn status_line(&self) -> String {
        if *self.game_over.get() {
            format!("GAME OVER  score {}", self.score.get())
        } else {
            format!("score {}", self.score.get())
        }
    }
}

impl Default for HudSignals {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_changed_drains_once() {
        let mut s = Signal::new(0u32);
        assert_eq!(s.take_changed(), None);
        s.set(50);
        assert_eq!(s.take_changed(), Some(&50));
        assert_eq!(s.take_changed(), None);
    }

    #[test]
    fn setting_same_value_is_quiet() {
        let mut s = Signal::new(false);
        s.set(false);
        assert_eq!(s.take_changed(), None);
    }

    #[test]
    fn score_accumulates() {
        let mut hud = HudSignals::default();
        hud.add_score(50);
        hud.add_score(50);
        assert_eq!(*hud.score.get(), 100);
        assert_eq!(hud.status_line(), "score 100");
        hud.game_over.set(true);
        assert_eq!(hud.status_line(), "GAME OVER  score 100");
    }
}
