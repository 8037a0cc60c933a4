use crate::components::{Drawable3D, LineGroup, LineSet, LineSetId, Transform};
use crate::entity::EntityId;
use foundation::arena::Arena;
use foundation::handles::Handle;

/// Entity storage with per-component columns indexed by `EntityId::index()`.
///
/// Despawned slots are recycled with a bumped generation; every accessor
/// checks the generation so stale ids are ignored.
#[derive(Debug, Default)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    transforms: Vec<Option<Transform>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    line_groups: Vec<Option<LineGroup>>,
    line_sets: Arena<LineSet>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let idx = index as usize;
            self.generations[idx] = self.generations[idx].wrapping_add(1);
            self.alive[idx] = true;
            return EntityId(Handle::new(index, self.generations[idx]));
        }

        let index = self.generations.len() as u32;
        self.ensure_capacity(index as usize);
        self.alive[index as usize] = true;
        EntityId(Handle::new(index, 0))
    }

    /// Removes `entity` and its components.
    ///
    /// Line sets referenced by the entity's `LineGroup` are owned by whoever
    /// added them and are not freed here.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let idx = entity.index() as usize;
        self.alive[idx] = false;
        self.transforms[idx] = None;
        self.drawables_3d[idx] = None;
        self.line_groups[idx] = None;
        self.free.push(entity.index());
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        let idx = entity.index() as usize;
        self.alive.get(idx).copied().unwrap_or(false)
            && self.generations[idx] == entity.generation()
    }

    pub fn entity_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        if self.is_alive(entity) {
            self.transforms[entity.index() as usize] = Some(transform);
        }
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        if !self.is_alive(entity) {
            return None;
        }
        self.transforms[entity.index() as usize]
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        if !self.is_alive(entity) {
            return None;
        }
        self.transforms[entity.index() as usize].as_mut()
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        if self.is_alive(entity) {
            self.drawables_3d[entity.index() as usize] = Some(drawable);
        }
    }

    pub fn drawable_3d_mut(&mut self, entity: EntityId) -> Option<&mut Drawable3D> {
        if !self.is_alive(entity) {
            return None;
        }
        self.drawables_3d[entity.index() as usize].as_mut()
    }

    pub fn set_line_group(&mut self, entity: EntityId, group: LineGroup) {
        if self.is_alive(entity) {
            self.line_groups[entity.index() as usize] = Some(group);
        }
    }

    pub fn line_group(&self, entity: EntityId) -> Option<&LineGroup> {
        if !self.is_alive(entity) {
            return None;
        }
        self.line_groups[entity.index() as usize].as_ref()
    }

    pub fn add_line_set(&mut self, set: LineSet) -> LineSetId {
        LineSetId(self.line_sets.insert(set))
    }

    pub fn remove_line_set(&mut self, id: LineSetId) -> Option<LineSet> {
        self.line_sets.remove(id.0)
    }

    pub fn line_set(&self, id: LineSetId) -> Option<&LineSet> {
        self.line_sets.get(id.0)
    }

    pub fn line_set_count(&self) -> usize {
        self.line_sets.len()
    }

    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms[idx] else {
                continue;
            };
            out.push((self.entity_at(idx), transform, *drawable));
        }
        out
    }

    /// Line groups with their transforms, in ascending entity index order.
    pub fn line_groups(&self) -> Vec<(EntityId, Transform, &LineGroup)> {
        let mut out = Vec::new();
        for (idx, group) in self.line_groups.iter().enumerate() {
            let Some(group) = group else { continue };
            let Some(transform) = self.transforms[idx] else {
                continue;
            };
            out.push((self.entity_at(idx), transform, group));
        }
        out
    }

    fn entity_at(&self, idx: usize) -> EntityId {
        EntityId(Handle::new(idx as u32, self.generations[idx]))
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.generations.len() <= idx {
            let new_len = idx + 1;
            self.generations.resize(new_len, 0);
            self.alive.resize(new_len, false);
            self.transforms.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.line_groups.resize(new_len, None);
        }
    }
}
