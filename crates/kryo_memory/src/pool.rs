//! Fixed-block pool allocator for tree nodes
//!
//! Slots are handed out in blocks of [`BLOCK_SIZE`]. A free list threads
//! through unoccupied slots so `alloc`/`free` are O(1) and never touch
//! occupied memory. Each slot carries a generation counter so a stale
//! [`PoolKey`] from a freed-and-reused slot can be detected rather than
//! silently aliasing a different value.

use std::fmt;

/// Number of slots allocated per block.
pub const BLOCK_SIZE: usize = 64;

/// A generational handle into a [`Pool`].
///
/// Two keys with the same `index` but different `generation` never refer
/// to the same live value - the generation changes every time a slot is
/// freed and reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    index: u32,
    generation: u32,
}

impl fmt::Debug for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolKey({}#{})", self.index, self.generation)
    }
}

impl PoolKey {
    /// Raw slot index, stable across generations. Useful for building
    /// secondary flat arrays indexed in parallel with the pool.
    pub fn slot_index(self) -> u32 {
        self.index
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Free { generation: u32, next: Option<u32> },
}

/// Point-in-time counters describing pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub total_allocated: usize,
    pub total_freed: usize,
    pub in_use: usize,
    pub blocks: usize,
}

/// A fixed-block pool of `T`, growing by [`BLOCK_SIZE`] slots at a time.
///
/// `alloc` draws from the free list, falling back to growing a new block
/// when the free list is empty. `free` never shrinks the backing storage;
/// it only threads the slot back onto the free list, matching the
/// "never reclaim block memory" behavior of the original pool.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    total_allocated: usize,
    total_freed: usize,
    in_use: usize,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            total_allocated: 0,
            total_freed: 0,
            in_use: 0,
        }
    }

    /// Pre-allocate enough blocks to hold at least `capacity` live slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        let blocks_needed = capacity.div_ceil(BLOCK_SIZE);
        for _ in 0..blocks_needed {
            pool.grow_block();
        }
        pool
    }

    fn grow_block(&mut self) {
        let base = self.slots.len() as u32;
        for i in 0..BLOCK_SIZE as u32 {
            let index = base + i;
            let next = if i + 1 < BLOCK_SIZE as u32 {
                Some(index + 1)
            } else {
                self.free_head
            };
            self.slots.push(Slot::Free {
                generation: 0,
                next,
            });
        }
        self.free_head = Some(base);
    }

    /// Allocate a slot holding `value`. Grows a new block if the free
    /// list is empty; never fails (aside from global OOM).
    pub fn alloc(&mut self, value: T) -> PoolKey {
        if self.free_head.is_none() {
            self.grow_block();
        }
        let index = self.free_head.expect("free list replenished above");
        let (generation, next) = match &self.slots[index as usize] {
            Slot::Free { generation, next } => (*generation, *next),
            Slot::Occupied { .. } => unreachable!("free list pointed at occupied slot"),
        };
        self.free_head = next;
        self.slots[index as usize] = Slot::Occupied { generation, value };
        self.total_allocated += 1;
        self.in_use += 1;
        PoolKey { index, generation }
    }

    /// Return a slot to the pool. The value is dropped and the slot's
    /// generation is bumped so existing [`PoolKey`]s into it become stale.
    /// No-op if `key` does not currently resolve to a live value.
    pub fn free(&mut self, key: PoolKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == key.generation => {
                let next_generation = generation.wrapping_add(1);
                let prev = std::mem::replace(
                    slot,
                    Slot::Free {
                        generation: next_generation,
                        next: self.free_head,
                    },
                );
                self.free_head = Some(key.index);
                self.total_freed += 1;
                self.in_use -= 1;
                match prev {
                    Slot::Occupied { value, .. } => Some(value),
                    Slot::Free { .. } => unreachable!(),
                }
            }
            _ => None,
        }
    }

    pub fn get(&self, key: PoolKey) -> Option<&T> {
        match self.slots.get(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: PoolKey) -> Option<&mut T> {
        match self.slots.get_mut(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, key: PoolKey) -> bool {
        self.get(key).is_some()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            total_allocated: self.total_allocated,
            total_freed: self.total_freed,
            in_use: self.in_use,
            blocks: self.slots.len().div_ceil(BLOCK_SIZE),
        }
    }

    pub fn len(&self) -> usize {
        self.in_use
    }

    pub fn is_empty(&self) -> bool {
        self.in_use == 0
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_free_roundtrip() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.alloc(1);
        let b = pool.alloc(2);
        assert_eq!(pool.get(a), Some(&1));
        assert_eq!(pool.get(b), Some(&2));
        assert_eq!(pool.stats().in_use, 2);

        pool.free(a);
        assert_eq!(pool.get(a), None, "freed slot must never resolve");
        assert_eq!(pool.stats().in_use, 1);
    }

    #[test]
    fn freed_slot_is_not_reachable_after_reuse() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.alloc(10);
        pool.free(a);
        let c = pool.alloc(20);
        // `c` may reuse a's slot index, but with a bumped generation.
        assert_eq!(pool.get(a), None);
        assert_eq!(pool.get(c), Some(&20));
    }

    #[test]
    fn grows_in_blocks() {
        let mut pool: Pool<u32> = Pool::new();
        for i in 0..(BLOCK_SIZE * 2 + 1) as u32 {
            pool.alloc(i);
        }
        assert_eq!(pool.stats().blocks, 3);
        assert_eq!(pool.stats().in_use, BLOCK_SIZE * 2 + 1);
    }

    #[test]
    fn double_free_is_noop() {
        let mut pool: Pool<u32> = Pool::new();
        let a = pool.alloc(1);
        assert!(pool.free(a).is_some());
        assert!(pool.free(a).is_none());
    }
}
