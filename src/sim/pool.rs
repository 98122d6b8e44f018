//! Bounded pools of lane entities (obstacles and coins)
//!
//! Both kinds share one pool type. Entities scroll toward the player, are
//! reaped once they fall behind, and are removed on contact when the
//! collision callback says so. Removal is a mark-and-compact sweep, so every
//! entity is looked at exactly once per pass.

use glam::Vec3;
use rand::Rng;

use super::collision::Aabb;
use super::lane::Lanes;
use crate::consts::{COIN_RADIUS, OBSTACLE_SIZE};

/// What a pool holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle,
    Coin,
}

impl EntityKind {
    /// Half extents of the collision box
    pub fn half_extents(self) -> Vec3 {
        match self {
            EntityKind::Obstacle => Vec3::splat(OBSTACLE_SIZE / 2.0),
            // Bounding box of the coin sphere
            EntityKind::Coin => Vec3::splat(COIN_RADIUS),
        }
    }
}

/// A single pooled entity
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub alive: bool,
}

impl Entity {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.half_extents())
    }
}

/// Collision callback verdict for one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Leave the entity in place
    Keep,
    /// Remove the entity (collected)
    Remove,
    /// Stop checking the rest of the pool (terminal hit)
    Halt,
}

/// Result of a collision pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollisionPass {
    /// Ids removed by the callback
    pub removed: Vec<u32>,
    /// Pass stopped early
    pub halted: bool,
}

/// Capacity-bounded, unordered set of one entity kind
#[derive(Debug, Clone)]
pub struct EntityPool {
    kind: EntityKind,
    capacity: usize,
    height: f32,
    reap_margin: f32,
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn new(kind: EntityKind, capacity: usize, height: f32, reap_margin: f32) -> Self {
        Self {
            kind,
            capacity,
            height,
            reap_margin,
            entities: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entities.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Spawn at `z` in a random lane. Silently refuses when full.
    pub fn spawn<R: Rng>(&mut self, id: u32, z: f32, lanes: &Lanes, rng: &mut R) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        let x = lanes.random_x(rng);
        self.insert(id, Vec3::new(x, self.height, z))
    }

    /// Place an entity at an exact position. Silently refuses when full.
    pub fn insert(&mut self, id: u32, pos: Vec3) -> Option<u32> {
        if self.is_full() {
            return None;
        }
        self.entities.push(Entity {
            id,
            kind: self.kind,
            pos,
            alive: true,
        });
        Some(id)
    }

    /// Move every entity toward the player (+Z) by `speed`
    pub fn advance(&mut self, speed: f32) {
        for entity in &mut self.entities {
            entity.pos.z += speed;
        }
    }

    /// Remove everything more than the reap margin behind `player_z`.
    /// Returns the removed ids.
    pub fn reap(&mut self, player_z: f32) -> Vec<u32> {
        let limit = player_z + self.reap_margin;
        for entity in &mut self.entities {
            if entity.pos.z > limit {
                entity.alive = false;
            }
        }
        self.compact()
    }

    /// Remove one entity by id
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    /// Test every entity against `bounds`, letting `on_hit` decide its fate
    pub fn collide<F>(&mut self, bounds: &Aabb, mut on_hit: F) -> CollisionPass
    where
        F: FnMut(&Entity) -> HitOutcome,
    {
        let mut halted = false;
        for entity in &mut self.entities {
            if !entity.bounds().intersects(bounds) {
                continue;
            }
            match on_hit(entity) {
                HitOutcome::Keep => {}
                HitOutcome::Remove => entity.alive = false,
                HitOutcome::Halt => {
                    halted = true;
                    break;
                }
            }
        }
        CollisionPass {
            removed: self.compact(),
            halted,
        }
    }

    /// Drop dead entities, returning their ids
    fn compact(&mut self) -> Vec<u32> {
        let removed: Vec<u32> = self
            .entities
            .iter()
            .filter(|e| !e.alive)
            .map(|e| e.id)
            .collect();
        if !removed.is_empty() {
            self.entities.retain(|e| e.alive);
        }
        removed
    }
}
