use glam::Vec2;

// Traversal stops after this many visited nodes. Tunable policy, kept at the
// historical value.
pub const MAX_PLAY_ITERATIONS: usize = 20;

// Outcome probabilities are clamped to this band before normalization.
pub const MIN_OUTCOME_PROBABILITY: f64 = 0.05;
pub const MAX_OUTCOME_PROBABILITY: f64 = 0.95;

// advantage / ADVANTAGE_DIVISOR is added to (or removed from) each outcome.
pub const ADVANTAGE_DIVISOR: f64 = 200.0;
pub const BADGE_ADVANTAGE_SCALE: f64 = 10.0;

pub const DEFENSIVE_REBOUND_MULTIPLIER: f64 = 2.5;
pub const MIN_OFFENSIVE_REBOUND_PROBABILITY: f64 = 0.15;
pub const MAX_OFFENSIVE_REBOUND_PROBABILITY: f64 = 0.40;

pub const FREE_THROW_ATTEMPTS: u8 = 2;

// Best, second best, anyone.
pub const ROLE_PICK_WEIGHTS: [u32; 3] = [70, 25, 5];

pub const BALL_HANDLER_ROLES: [&str; 4] = ["ballHandler", "pointGuard", "handler", "primaryHandler"];
pub const PLACEHOLDER_ROLE: &str = "placeholder";

pub const DEFAULT_ACTION_DURATION: f32 = 1.0;
pub const REBOUND_DURATION: f32 = 1.5;
pub const FREE_THROW_DURATION: f32 = 6.0;

// Half court in feet, basket at the bottom edge.
pub const BASKET_POSITION: Vec2 = Vec2::new(25.0, 5.25);
pub const FREE_THROW_LINE: Vec2 = Vec2::new(25.0, 19.0);
pub const MAN_DEFENSE_GAP: f32 = 3.0;
pub const PRESSURE_DEFENSE_GAP: f32 = 1.5;

// Shot type inferred from the shooter's distance to the basket when the
// action does not name one.
pub const CLOSE_SHOT_DISTANCE: f32 = 6.0;
pub const THREE_POINT_DISTANCE: f32 = 22.0;
