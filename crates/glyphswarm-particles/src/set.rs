//! Insertion-ordered particle collection with removal by identity.

use std::collections::HashMap;

use crate::{Particle, ParticleId};

/// Tombstones tolerated before the slot vector is compacted.
const COMPACT_MIN_SLOTS: usize = 64;

/// Particles in insertion order.
///
/// Removal leaves a tombstone so that lookups through the id index stay
/// O(1); slots are compacted once tombstones outnumber live particles.
#[derive(Debug, Default)]
pub struct ParticleSet {
    slots: Vec<Option<Particle>>,
    index: HashMap<ParticleId, usize>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.index.get(&id).and_then(|&slot| self.slots[slot].as_ref())
    }

    /// Append a particle. A particle with the same id is replaced in place.
    pub fn push(&mut self, particle: Particle) {
        if let Some(&slot) = self.index.get(&particle.id()) {
            self.slots[slot] = Some(particle);
            return;
        }
        self.index.insert(particle.id(), self.slots.len());
        self.slots.push(Some(particle));
    }

    /// Remove the particle with `id`.
    pub fn remove(&mut self, id: ParticleId) -> Option<Particle> {
        let slot = self.index.remove(&id)?;
        let particle = self.slots[slot].take();
        self.maybe_compact();
        particle
    }

    /// Remove the most recently added particle.
    pub fn pop(&mut self) -> Option<Particle> {
        while let Some(slot) = self.slots.pop() {
            if let Some(particle) = slot {
                self.index.remove(&particle.id());
                return Some(particle);
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.slots.iter_mut().flatten()
    }

    fn maybe_compact(&mut self) {
        let tombstones = self.slots.len() - self.index.len();
        if self.slots.len() < COMPACT_MIN_SLOTS || tombstones <= self.index.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        for (slot, particle) in self.slots.iter().enumerate() {
            if let Some(particle) = particle {
                self.index.insert(particle.id(), slot);
            }
        }
    }
}

impl Extend<Particle> for ParticleSet {
    fn extend<I: IntoIterator<Item = Particle>>(&mut self, iter: I) {
        for particle in iter {
            self.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphswarm_core::Point;
    use ratatui::style::Color;

    fn particle(id: u64) -> Particle {
        Particle::traveling(
            ParticleId(id),
            Point::ORIGIN,
            Point::new(id as f32, 0.0),
            1.0,
            Color::White,
        )
    }

    fn ids(set: &ParticleSet) -> Vec<u64> {
        set.iter().map(|p| p.id().0).collect()
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut set = ParticleSet::new();
        set.extend((0..5).map(particle));
        assert_eq!(ids(&set), vec![0, 1, 2, 3, 4]);
        assert!(set.remove(ParticleId(2)).is_some());
        assert_eq!(ids(&set), vec![0, 1, 3, 4]);
        set.push(particle(2));
        assert_eq!(ids(&set), vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut set = ParticleSet::new();
        set.push(particle(1));
        assert!(set.remove(ParticleId(9)).is_none());
        assert!(set.remove(ParticleId(1)).is_some());
        assert!(set.remove(ParticleId(1)).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_pop_skips_tombstones() {
        let mut set = ParticleSet::new();
        set.extend((0..4).map(particle));
        set.remove(ParticleId(3));
        assert_eq!(set.pop().map(|p| p.id()), Some(ParticleId(2)));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(ParticleId(2)));
    }

    #[test]
    fn test_compaction_preserves_lookup() {
        let mut set = ParticleSet::new();
        set.extend((0..200).map(particle));
        for id in (0..200).filter(|id| id % 4 != 0) {
            set.remove(ParticleId(id));
        }
        assert_eq!(set.len(), 50);
        assert!(set.slots.len() < 200);
        for id in (0..200).step_by(4) {
            let p = set.get(ParticleId(id)).expect("survivor must be indexed");
            assert_eq!(p.id(), ParticleId(id));
        }
        assert_eq!(ids(&set), (0..200).step_by(4).collect::<Vec<_>>());
    }

    #[test]
    fn test_push_same_id_replaces() {
        let mut set = ParticleSet::new();
        set.push(particle(1));
        set.push(particle(1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().count(), 1);
    }
}
