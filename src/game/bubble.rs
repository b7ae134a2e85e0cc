//! Bubble entities - the floating sprites the player pops.
//!
//! A bubble lives in window space (origin top-left, Y down) with Z used
//! only as a depth cue: a bubble with a larger Z is closer and drawn larger.

use bevy::prelude::*;
use rand::Rng;

use super::{
    assets::{BubbleAssets, LoadedTexture},
    explosion,
};
use crate::config::BubbleConfig;

/// Z distance at which a bubble reaches full size.
const DEPTH_SCALE_RANGE: f32 = 200.0;

/// Stable identifier used to match a bubble with its sprite entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct BubbleId(pub u32);

impl std::fmt::Display for BubbleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The eight bubble textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Default)]
pub enum BubbleColor {
    #[default]
    Blue,
    Brown,
    Green,
    Orange,
    Purple,
    Red,
    Teal,
    Yellow,
}

impl BubbleColor {
    /// All colors, in spawn rotation order.
    pub const ALL: [BubbleColor; 8] = [
        BubbleColor::Blue,
        BubbleColor::Brown,
        BubbleColor::Green,
        BubbleColor::Orange,
        BubbleColor::Purple,
        BubbleColor::Red,
        BubbleColor::Teal,
        BubbleColor::Yellow,
    ];

    /// File name of the texture for this color, relative to the asset dir.
    pub fn file_name(self) -> &'static str {
        match self {
            BubbleColor::Blue => "mm_blue.png",
            BubbleColor::Brown => "mm_brown.png",
            BubbleColor::Green => "mm_green.png",
            BubbleColor::Orange => "mm_orange.png",
            BubbleColor::Purple => "mm_purple.png",
            BubbleColor::Red => "mm_red.png",
            BubbleColor::Teal => "mm_teal.png",
            BubbleColor::Yellow => "mm_yellow.png",
        }
    }

    /// Position of this color in [`BubbleColor::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single floating bubble and its explosion state.
#[derive(Debug, Clone, Reflect)]
pub struct Bubble {
    pub id: BubbleId,
    pub color: BubbleColor,
    pub texture: Handle<Image>,
    /// Texture size in pixels (before depth scaling).
    pub size: UVec2,
    /// Position in window space, Z in `[0, depth]`.
    pub pos: Vec3,
    /// Drift per second.
    pub velocity: Vec3,
    pub exploding: bool,
    pub exploded: bool,
    /// Seconds since the explosion started.
    pub explosion_elapsed: f32,
    /// Seconds per explosion frame.
    pub explosion_interval: f32,
    pub explosion_texture: Handle<Image>,
}

impl Bubble {
    pub fn new(
        id: BubbleId,
        color: BubbleColor,
        texture: &LoadedTexture,
        pos: Vec3,
        velocity: Vec3,
        explosion_texture: Handle<Image>,
        explosion_interval: f32,
    ) -> Self {
        Self {
            id,
            color,
            texture: texture.handle.clone(),
            size: texture.size,
            pos,
            velocity,
            exploding: false,
            exploded: false,
            explosion_elapsed: 0.0,
            explosion_interval,
            explosion_texture,
        }
    }

    /// Render scale derived from depth, always in (0, 1].
    pub fn depth_scale(&self) -> f32 {
        ((self.pos.z / DEPTH_SCALE_RANGE + 1.0) / 2.0).clamp(f32::EPSILON, 1.0)
    }

    /// Hit circle in window space: center and radius.
    pub fn hit_circle(&self) -> (Vec2, f32) {
        let radius = self.size.x as f32 / 2.0 * self.depth_scale();
        (self.pos.truncate(), radius)
    }

    /// Whether a click at `point` pops this bubble.
    ///
    /// Bubbles that are already exploding can't be hit again, so a held
    /// click over one falls through to the bubble below it instead of
    /// restarting its animation.
    pub fn is_hit(&self, point: Vec2) -> bool {
        if self.exploding || self.exploded {
            return false;
        }
        let (center, radius) = self.hit_circle();
        point.distance_squared(center) < radius * radius
    }

    /// Start the explosion animation from its first frame.
    pub fn start_exploding(&mut self) {
        self.exploding = true;
        self.explosion_elapsed = 0.0;
    }

    /// Advance the explosion timer. Returns true when the animation just finished.
    pub fn advance_explosion(&mut self, elapsed: f32) -> bool {
        if !self.exploding {
            return false;
        }
        self.explosion_elapsed += elapsed;
        if explosion::frame_index(self.explosion_elapsed, self.explosion_interval).is_none() {
            self.exploding = false;
            self.exploded = true;
            return true;
        }
        false
    }

    /// Sprite-sheet frame to draw, if the bubble is exploding.
    pub fn explosion_frame(&self) -> Option<usize> {
        if !self.exploding {
            return None;
        }
        explosion::frame_index(self.explosion_elapsed, self.explosion_interval)
    }

    /// Move by `velocity * elapsed`, reflecting off the `[0, bounds]` box.
    ///
    /// The velocity of any axis whose next position would leave the box is
    /// inverted before the move is applied.
    pub fn drift(&mut self, elapsed: f32, bounds: Vec3) {
        let next = self.pos + self.velocity * elapsed;
        for axis in 0..3 {
            if next[axis] < 0.0 || next[axis] > bounds[axis] {
                self.velocity[axis] = -self.velocity[axis];
            }
        }
        self.pos += self.velocity * elapsed;
    }
}

/// Create the startup batch of bubbles at random positions and drift speeds.
///
/// Bubble `i` uses color `i % 8`, so every color shows up.
pub fn spawn_batch(
    rng: &mut impl Rng,
    config: &BubbleConfig,
    assets: &BubbleAssets,
) -> Vec<Bubble> {
    (0..config.bubble_count)
        .map(|i| {
            let color = BubbleColor::ALL[i % BubbleColor::ALL.len()];
            let pos = Vec3::new(
                rng.random::<f32>() * config.width,
                rng.random::<f32>() * config.height,
                rng.random::<f32>() * config.depth,
            );
            let velocity = Vec3::new(
                (rng.random::<f32>() * 2.0 - 1.0) * config.max_drift,
                (rng.random::<f32>() * 2.0 - 1.0) * config.max_drift,
                rng.random::<f32>() * config.max_depth_drift,
            );
            Bubble::new(
                BubbleId(i as u32),
                color,
                assets.bubble_texture(color),
                pos,
                velocity,
                assets.explosion.handle.clone(),
                config.explosion_interval,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn bubble_at(pos: Vec3) -> Bubble {
        let texture = LoadedTexture {
            handle: Handle::default(),
            size: UVec2::splat(64),
        };
        Bubble::new(
            BubbleId(0),
            BubbleColor::Blue,
            &texture,
            pos,
            Vec3::ZERO,
            Handle::default(),
            0.05,
        )
    }

    #[test]
    fn test_depth_scale_range() {
        assert_eq!(bubble_at(Vec3::ZERO).depth_scale(), 0.5);
        assert_eq!(bubble_at(Vec3::new(0.0, 0.0, 100.0)).depth_scale(), 0.75);

        for z in [-1000.0, -200.0, -50.0, 0.0, 100.0, 200.0, 5000.0] {
            let scale = bubble_at(Vec3::new(0.0, 0.0, z)).depth_scale();
            assert!(scale > 0.0 && scale <= 1.0, "scale {scale} out of range for z={z}");
        }
    }

    #[test]
    fn test_hit_radius_scales_with_depth() {
        let near = bubble_at(Vec3::new(100.0, 100.0, 100.0));
        let far = bubble_at(Vec3::new(100.0, 100.0, 0.0));
        // 64px texture: radius 32 * 0.75 = 24 vs 32 * 0.5 = 16.
        assert_eq!(near.hit_circle().1, 24.0);
        assert_eq!(far.hit_circle().1, 16.0);

        let point = Vec2::new(120.0, 100.0);
        assert!(near.is_hit(point));
        assert!(!far.is_hit(point));
    }

    #[test]
    fn test_hit_is_strict() {
        let bubble = bubble_at(Vec3::new(100.0, 100.0, 0.0));
        assert!(!bubble.is_hit(Vec2::new(116.0, 100.0)));
        assert!(bubble.is_hit(Vec2::new(115.9, 100.0)));
    }

    #[test]
    fn test_exploding_bubble_not_hit_again() {
        let mut bubble = bubble_at(Vec3::new(100.0, 100.0, 0.0));
        bubble.start_exploding();
        assert!(!bubble.is_hit(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_drift_reflects_only_crossing_axis() {
        let mut bubble = bubble_at(Vec3::new(795.0, 300.0, 50.0));
        bubble.velocity = Vec3::new(100.0, -20.0, 10.0);
        bubble.drift(0.1, Vec3::new(800.0, 600.0, 100.0));

        assert_eq!(bubble.velocity, Vec3::new(-100.0, -20.0, 10.0));
        assert_eq!(bubble.pos, Vec3::new(785.0, 298.0, 51.0));
    }

    #[test]
    fn test_drift_reflects_depth_at_zero() {
        let mut bubble = bubble_at(Vec3::new(400.0, 300.0, 1.0));
        bubble.velocity = Vec3::new(0.0, 0.0, -20.0);
        bubble.drift(0.1, Vec3::new(800.0, 600.0, 100.0));

        assert_eq!(bubble.velocity, Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(bubble.pos.z, 3.0);
    }

    #[test]
    fn test_spawn_batch_cycles_colors_within_bounds() {
        let config = BubbleConfig::default();
        let assets = BubbleAssets::placeholder(UVec2::splat(64));
        let mut rng = StdRng::seed_from_u64(7);

        let bubbles = spawn_batch(&mut rng, &config, &assets);
        assert_eq!(bubbles.len(), 20);

        for (i, bubble) in bubbles.iter().enumerate() {
            assert_eq!(bubble.id, BubbleId(i as u32));
            assert_eq!(bubble.color, BubbleColor::ALL[i % 8]);
            assert!(bubble.pos.x >= 0.0 && bubble.pos.x < config.width);
            assert!(bubble.pos.y >= 0.0 && bubble.pos.y < config.height);
            assert!(bubble.pos.z >= 0.0 && bubble.pos.z < config.depth);
            assert!(bubble.velocity.x.abs() <= config.max_drift);
            assert!(bubble.velocity.y.abs() <= config.max_drift);
            assert!(bubble.velocity.z >= 0.0 && bubble.velocity.z < config.max_depth_drift);
            assert!(!bubble.exploding && !bubble.exploded);
        }
    }
}
