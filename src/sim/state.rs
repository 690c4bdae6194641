//! Game state and core simulation types
//!
//! `GameState` owns everything the simulation mutates: the basket, the
//! falling objects and the session counters. Renderers only ever borrow it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Falling object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Apple,
    Banana,
    Grape,
    Bomb,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 4] = [
        ObjectKind::Apple,
        ObjectKind::Banana,
        ObjectKind::Grape,
        ObjectKind::Bomb,
    ];

    /// The fruit kinds, in the order the spawner indexes them
    pub const FRUITS: [ObjectKind; 3] = [ObjectKind::Apple, ObjectKind::Banana, ObjectKind::Grape];

    /// Points awarded for catching this kind (bombs award nothing)
    pub fn points(&self) -> u32 {
        match self {
            ObjectKind::Apple => 10,
            ObjectKind::Banana => 20,
            ObjectKind::Grape => 30,
            ObjectKind::Bomb => 0,
        }
    }

    #[inline]
    pub fn is_bomb(&self) -> bool {
        matches!(self, ObjectKind::Bomb)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Apple => "Apple",
            ObjectKind::Banana => "Banana",
            ObjectKind::Grape => "Grape",
            ObjectKind::Bomb => "Bomb",
        }
    }
}

/// A fruit or bomb falling through the play area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub bounds: Rect,
    pub kind: ObjectKind,
    /// Pixels per tick, always positive
    pub speed: i32,
}

impl FallingObject {
    /// Advance one tick downward
    #[inline]
    pub fn fall(&mut self) {
        self.bounds.translate(IVec2::new(0, self.speed));
    }
}

/// Logical play area dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: i32,
    pub height: i32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
        }
    }
}

/// The player's basket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub bounds: Rect,
}

impl Basket {
    /// Basket centered horizontally near the bottom of the play area
    pub fn new_centered(area: PlayArea) -> Self {
        Self {
            bounds: Rect::new(
                area.width / 2 - BASKET_WIDTH / 2,
                area.height - BASKET_HEIGHT - BASKET_BOTTOM_MARGIN,
                BASKET_WIDTH,
                BASKET_HEIGHT,
            ),
        }
    }

    /// Largest X the basket may occupy
    #[inline]
    pub fn max_x(&self, area: PlayArea) -> i32 {
        (area.width - self.bounds.width()).max(0)
    }
}

/// Something noteworthy that happened during the last spawn/tick/restart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObjectKind },
    Caught { kind: ObjectKind, points: u32 },
    BombHit { lives_left: i32 },
    Missed { kind: ObjectKind },
    SpeedUp { multiplier: f32 },
    DifficultyUp { level: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play area all position math is relative to
    pub area: PlayArea,
    /// Player basket
    pub basket: Basket,
    /// Falling objects in insertion order
    pub objects: Vec<FallingObject>,
    pub score: u32,
    pub lives: i32,
    /// Simulation ticks elapsed this session
    pub time_ticks: u64,
    /// Applied to newly spawned objects' speed, never decreases
    pub speed_multiplier: f32,
    /// Widens the base speed range of spawned objects
    pub difficulty: u32,
    pub game_over: bool,
    /// Events produced by the most recent tick (spawns append)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next object ID, keeps increasing across restarts
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(PlayArea::default())
    }
}

impl GameState {
    /// Create a fresh session for the given play area
    pub fn new(area: PlayArea) -> Self {
        Self {
            area,
            basket: Basket::new_centered(area),
            objects: Vec::new(),
            score: 0,
            lives: START_LIVES,
            time_ticks: 0,
            speed_multiplier: START_SPEED_MULTIPLIER,
            difficulty: START_DIFFICULTY,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset every session value to its starting point
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self::new(self.area);
        self.next_id = next_id;
    }

    /// Restart after a game over. Returns false (and changes nothing) while
    /// the game is still running.
    pub fn restart(&mut self) -> bool {
        if !self.game_over {
            return false;
        }
        self.reset();
        self.events.push(GameEvent::Restarted);
        true
    }

    /// Find a live object by ID
    #[cfg(test)]
    pub(crate) fn object(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}
