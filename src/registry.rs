//! Category-partitioned storage for every live entity.
//!
//! Each category lives in its own [`Group`]; an entity belongs to exactly one
//! group and leaves the game when it is removed from it.

use crate::entities::{Bullet, Enemy, Explosion, Planet, PowerUp};

#[derive(Clone, Debug, PartialEq)]
pub struct Group<T> {
    items: Vec<T>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keeps the members for which `keep` holds and returns how many were dropped.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    /// Removes the members matching `pred` and hands them back in order.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let (taken, kept): (Vec<T>, Vec<T>) = self.items.drain(..).partition(|item| pred(item));
        self.items = kept;
        taken
    }

    /// Removes the members whose positions are flagged in `mask`.
    /// `mask` must be as long as the group.
    pub fn remove_masked(&mut self, mask: &[bool]) -> Vec<T> {
        debug_assert_eq!(mask.len(), self.items.len());
        let mut flags = mask.iter().copied();
        self.remove_where(|_| flags.next().unwrap_or(false))
    }

    /// Runs `step` on every member; members for which it returns `false` are dropped.
    pub fn update(&mut self, mut step: impl FnMut(&mut T) -> bool) {
        self.items.retain_mut(|item| step(item));
    }
}

impl<T> Extend<T> for Group<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Every entity group of a running game, in update order. The player is kept
/// by name on the world rather than in here.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub planets: Group<Planet>,
    pub enemies: Group<Enemy>,
    pub player_bullets: Group<Bullet>,
    pub enemy_bullets: Group<Bullet>,
    pub power_ups: Group<PowerUp>,
    pub effects: Group<Explosion>,
}

impl Registry {
    pub fn clear(&mut self) {
        self.planets.clear();
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.effects.clear();
    }

    pub fn live_count(&self) -> usize {
        self.planets.len()
            + self.enemies.len()
            + self.player_bullets.len()
            + self.enemy_bullets.len()
            + self.power_ups.len()
            + self.effects.len()
    }
}
