//! Scrolling ground track
//!
//! A FIFO window of contiguous ground segments. The front of the queue is
//! the oldest (nearest the start), the back is the farthest ahead.

use std::collections::VecDeque;

/// One ground tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    pub id: u32,
    /// Center of the segment along Z
    pub z: f32,
}

/// Segments appended/evicted by one maintenance pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extension {
    pub added: TrackSegment,
    pub evicted: TrackSegment,
}

#[derive(Debug, Clone)]
pub struct Track {
    segments: VecDeque<TrackSegment>,
    segment_length: f32,
    window_length: f32,
}

impl Track {
    /// Seed `count` contiguous segments running forward from z = 0.
    /// `next_id` is called once per segment.
    pub fn seeded(
        count: usize,
        segment_length: f32,
        window_length: f32,
        mut next_id: impl FnMut() -> u32,
    ) -> Self {
        let segments = (0..count)
            .map(|i| TrackSegment {
                id: next_id(),
                z: -(i as f32) * segment_length,
            })
            .collect();
        Self {
            segments,
            segment_length,
            window_length,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackSegment> {
        self.segments.iter()
    }

    pub fn segment_length(&self) -> f32 {
        self.segment_length
    }

    /// Farthest segment ahead of the player
    pub fn farthest(&self) -> Option<&TrackSegment> {
        self.segments.back()
    }

    /// Distance from the player to the farthest segment
    pub fn ahead_of(&self, player_z: f32) -> Option<f32> {
        self.farthest().map(|s| player_z - s.z)
    }

    /// Append one segment past the farthest and evict the oldest once the
    /// ground ahead drops below the window length.
    pub fn maintain(&mut self, player_z: f32, next_id: impl FnOnce() -> u32) -> Option<Extension> {
        let farthest = *self.segments.back()?;
        if player_z - farthest.z >= self.window_length {
            return None;
        }
        let added = TrackSegment {
            id: next_id(),
            z: farthest.z - self.segment_length,
        };
        self.segments.push_back(added);
        let evicted = self.segments.pop_front()?;
        log::debug!("Track extended to z={} (evicted segment {})", added.z, evicted.id);
        Some(Extension { added, evicted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SEGMENT_COUNT, SEGMENT_LENGTH, WINDOW_SEGMENTS};

    fn track() -> (Track, u32) {
        let mut id = 0;
        let track = Track::seeded(
            SEGMENT_COUNT,
            SEGMENT_LENGTH,
            WINDOW_SEGMENTS as f32 * SEGMENT_LENGTH,
            || {
                id += 1;
                id
            },
        );
        (track, id)
    }

    #[test]
    fn test_seeded_contiguous() {
        let (track, _) = track();
        assert_eq!(track.len(), SEGMENT_COUNT);
        let zs: Vec<f32> = track.iter().map(|s| s.z).collect();
        assert_eq!(zs[0], 0.0);
        assert!(zs.windows(2).all(|w| w[0] - w[1] == SEGMENT_LENGTH));
        assert_eq!(track.farthest().unwrap().z, -1900.0);
    }

    #[test]
    fn test_no_extension_while_window_covered() {
        let (mut track, _) = track();
        assert!(track.maintain(-899.0, || 99).is_none());
        assert_eq!(track.len(), SEGMENT_COUNT);
    }

    #[test]
    fn test_extension_is_fifo() {
        let (mut track, mut next) = track();
        let ext = track
            .maintain(-901.0, || {
                next += 1;
                next
            })
            .unwrap();
        assert_eq!(ext.added.z, -2000.0);
        assert_eq!(ext.evicted.z, 0.0);
        assert_eq!(track.len(), SEGMENT_COUNT);
        assert_eq!(track.iter().next().unwrap().z, -100.0);
        assert_eq!(track.farthest().unwrap().id, next);
    }

    #[test]
    fn test_window_holds_while_running() {
        let (mut track, mut next) = track();
        let window = WINDOW_SEGMENTS as f32 * SEGMENT_LENGTH;
        let mut z = 0.0;
        let mut extended = false;
        while z > -20_000.0 {
            z -= 0.5;
            if track
                .maintain(z, || {
                    next += 1;
                    next
                })
                .is_some()
            {
                extended = true;
            }
            let ahead = track.ahead_of(z).unwrap();
            assert!(ahead >= window);
            if extended {
                assert!(ahead < window + SEGMENT_LENGTH);
            }
            assert_eq!(track.len(), SEGMENT_COUNT);
        }
        assert!(extended);
    }

    #[test]
    fn test_empty_track_never_extends() {
        let mut track = Track::seeded(0, SEGMENT_LENGTH, 1000.0, || 0);
        assert!(track.is_empty());
        assert!(track.maintain(-5000.0, || 1).is_none());
        assert!(track.ahead_of(0.0).is_none());
    }
}
