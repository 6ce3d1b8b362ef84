//! Game entity system with simple integer IDs

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Simple integer ID for game entities, typed by the entity it names
///
/// Keeps IDs simple and contiguous for human readability and dense storage.
/// These IDs are stable throughout a session - entities don't get deallocated.
/// The phantom type keeps a `CardId` from being passed where a `PlayerId` is
/// expected; on the wire both are bare integers.
pub struct EntityId<T> {
    raw: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub const fn new(id: u32) -> Self {
        EntityId {
            raw: id,
            _marker: PhantomData,
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.raw
    }
}

// Manual impls: derives would put bounds on T.
impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T> PartialEq for EntityId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for EntityId<T> {}

impl<T> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.raw)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.raw)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(EntityId::new)
    }
}

/// Base trait for all game entities
pub trait GameEntity<T> {
    fn id(&self) -> EntityId<T>;
    fn name(&self) -> &str;
}

/// Central storage for all entities of one kind
///
/// Storage is an ordered arena: iteration order is stable and meaningful
/// (for cards it encodes library and stack order, end of sequence = top).
/// An FxHashMap index gives O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    entities: Vec<T>,
    index: FxHashMap<EntityId<T>, usize>,
}

impl<T: GameEntity<T>> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore {
            entities: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Insert an entity at the end of storage, replacing any entity with the same id in place
    pub fn insert(&mut self, entity: T) {
        let id = entity.id();
        match self.index.get(&id) {
            Some(&pos) => self.entities[pos] = entity,
            None => {
                self.index.insert(id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    /// Get an entity by ID
    pub fn get(&self, id: EntityId<T>) -> Option<&T> {
        self.index.get(&id).map(|&pos| &self.entities[pos])
    }

    /// Get a mutable reference to an entity
    pub fn get_mut(&mut self, id: EntityId<T>) -> Option<&mut T> {
        match self.index.get(&id) {
            Some(&pos) => Some(&mut self.entities[pos]),
            None => None,
        }
    }

    /// Check if an entity exists
    pub fn contains(&self, id: EntityId<T>) -> bool {
        self.index.contains_key(&id)
    }

    /// Storage position of an entity
    pub fn position(&self, id: EntityId<T>) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Iterate over all entities in storage order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entities.iter_mut()
    }

    /// Drop every entity the predicate rejects, keeping the survivors' relative order
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.entities.retain(keep);
        self.rebuild_index();
    }

    /// Reorder the entities selected by `selected` so they follow `order`
    ///
    /// The selected entities keep occupying the same storage slots; only which
    /// entity sits in which of those slots changes. Selected entities absent
    /// from `order` go after the listed ones in their existing relative order.
    /// Ids in `order` that are not selected are ignored.
    pub fn reorder_where(&mut self, selected: impl Fn(&T) -> bool, order: &[EntityId<T>]) {
        let slots: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| selected(*e))
            .map(|(pos, _)| pos)
            .collect();
        if slots.len() < 2 {
            return;
        }

        let rank: FxHashMap<EntityId<T>, usize> =
            order.iter().enumerate().map(|(rank, id)| (*id, rank)).collect();
        let mut sources = slots.clone();
        // Stable sort: unlisted entities share the rank `usize::MAX` and keep their order.
        sources.sort_by_key(|&pos| {
            rank.get(&self.entities[pos].id())
                .copied()
                .unwrap_or(usize::MAX)
        });

        let mut taken: Vec<Option<T>> = self.entities.drain(..).map(Some).collect();
        let mut slot_iter = slots.iter().zip(sources.iter()).peekable();
        let mut rebuilt = Vec::with_capacity(taken.len());
        for pos in 0..taken.len() {
            let source = match slot_iter.peek() {
                Some(&(&slot, &source)) if slot == pos => {
                    slot_iter.next();
                    source
                }
                _ => pos,
            };
            if let Some(entity) = taken[source].take() {
                rebuilt.push(entity);
            }
        }
        self.entities = rebuilt;
        self.rebuild_index();
    }

    /// Get count of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, entity) in self.entities.iter().enumerate() {
            self.index.insert(entity.id(), pos);
        }
    }
}

impl<T: GameEntity<T>> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for EntityStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

// Only the ordered entities go on the wire; the index is rebuilt on load.
impl<T: Serialize> Serialize for EntityStore<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entities.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for EntityStore<T>
where
    T: Deserialize<'de> + GameEntity<T>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entities = Vec::<T>::deserialize(deserializer)?;
        let mut store = EntityStore {
            entities,
            index: FxHashMap::default(),
        };
        store.rebuild_index();
        if store.index.len() != store.entities.len() {
            return Err(serde::de::Error::custom("duplicate entity id in store"));
        }
        Ok(store)
    }
}
