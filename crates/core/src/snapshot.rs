use crate::grid::{Field, Preview};

/// Value copy of one game's observable state, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub field: Field,
    pub preview: Preview,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub speed: u32,
    pub paused: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: Field::new(),
            preview: Preview::new(),
            score: 0,
            high_score: 0,
            level: 1,
            speed: 1,
            paused: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EMPTY;

    #[test]
    fn test_default_is_idle_blank_state() {
        let snap = GameSnapshot::default();
        assert!(snap.paused);
        assert_eq!((snap.score, snap.high_score, snap.level, snap.speed), (0, 0, 1, 1));
        assert_eq!(snap.field.count(|c| c != EMPTY), 0);
        assert_eq!(snap.preview.count(|c| c != EMPTY), 0);
    }
}
