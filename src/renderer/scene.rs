//! Retained scene mirror
//!
//! Holds one visual node per live segment, obstacle and coin, keyed by
//! entity id. Nodes are added and detached from `GameEvent`s; positions are
//! refreshed from the simulation before every frame.

use std::collections::BTreeMap;

use glam::Vec3;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::camera::Camera;
use crate::consts::{COIN_RADIUS, OBSTACLE_SIZE, PLAYER_SIZE, SEGMENT_WIDTH};
use crate::sim::{EntityKind, GameEvent, GameState};

/// Triangles per coin disc
const COIN_SEGMENTS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Ground,
    Obstacle,
    Coin,
}

#[derive(Debug, Clone, Copy)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub pos: Vec3,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<u32, SceneNode>,
    segment_length: f32,
}

impl Scene {
    pub fn new(segment_length: f32) -> Self {
        Self {
            nodes: BTreeMap::new(),
            segment_length,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes.keys().copied()
    }

    /// Add or detach nodes; HUD-only events are ignored
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::SegmentAdded { id, z } => {
                self.nodes.insert(
                    id,
                    SceneNode {
                        kind: NodeKind::Ground,
                        pos: Vec3::new(0.0, 0.0, z),
                    },
                );
            }
            GameEvent::EntitySpawned { id, kind, pos } => {
                let kind = match kind {
                    EntityKind::Obstacle => NodeKind::Obstacle,
                    EntityKind::Coin => NodeKind::Coin,
                };
                self.nodes.insert(id, SceneNode { kind, pos });
            }
            GameEvent::Removed { id } => {
                self.nodes.remove(&id);
            }
            GameEvent::CoinsChanged { .. }
            | GameEvent::SpeedChanged { .. }
            | GameEvent::GameOver { .. } => {}
        }
    }

    /// Copy current entity positions from the simulation
    pub fn sync(&mut self, state: &GameState) {
        for entity in state.obstacles.iter().chain(state.coin_pool.iter()) {
            if let Some(node) = self.nodes.get_mut(&entity.id) {
                node.pos = entity.pos;
            }
        }
    }

    /// Build this frame's triangle list (painter's order: ground, then
    /// everything else far to near)
    pub fn build_vertices(&self, camera: &Camera, player_pos: Vec3) -> Vec<Vertex> {
        let view = camera.view();
        let proj = camera.projection();
        let view_proj = proj * view;
        let eye = camera.eye;

        let mut vertices = Vec::new();

        let mut ground: Vec<&SceneNode> = self
            .nodes
            .values()
            .filter(|n| n.kind == NodeKind::Ground)
            .collect();
        ground.sort_by(|a, b| a.pos.z.total_cmp(&b.pos.z));
        for node in ground {
            vertices.extend(shapes::ground_tile(
                &view_proj,
                node.pos.z,
                SEGMENT_WIDTH,
                self.segment_length,
                colors::GROUND,
            ));
        }

        // Player drawn like any other box
        let player = SceneNode {
            kind: NodeKind::Obstacle,
            pos: player_pos,
        };
        let mut solids: Vec<(bool, &SceneNode)> = self
            .nodes
            .values()
            .filter(|n| n.kind != NodeKind::Ground)
            .map(|n| (false, n))
            .chain(std::iter::once((true, &player)))
            .collect();
        solids.sort_by(|a, b| {
            let da = a.1.pos.distance_squared(eye);
            let db = b.1.pos.distance_squared(eye);
            db.total_cmp(&da)
        });

        for (is_player, node) in solids {
            match node.kind {
                NodeKind::Coin => vertices.extend(shapes::disc(
                    &view,
                    &proj,
                    node.pos,
                    COIN_RADIUS,
                    colors::COIN,
                    COIN_SEGMENTS,
                )),
                _ if is_player => vertices.extend(shapes::cube(
                    &view_proj,
                    eye,
                    node.pos,
                    PLAYER_SIZE,
                    colors::PLAYER,
                )),
                _ => vertices.extend(shapes::cube(
                    &view_proj,
                    eye,
                    node.pos,
                    OBSTACLE_SIZE,
                    colors::OBSTACLE,
                )),
            }
        }

        vertices
    }
}
