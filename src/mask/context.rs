use std::ops::Deref;

use smallvec::SmallVec;

use crate::foundation::core::{Coord, MAX_MASKS, Opa};
use crate::mask::{MaskGen, MaskParam, MaskResult};

/// Handle of a registered mask.
///
/// Carries the slot generation, so a handle outliving its mask never removes the
/// mask that later reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskId {
    slot: u8,
    generation: u32,
}

impl MaskId {
    /// Slot index, `0..MAX_MASKS`.
    pub fn slot(self) -> usize {
        usize::from(self.slot)
    }
}

/// Opaque token grouping masks for bulk removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnerTag(pub u64);

#[derive(Debug)]
struct Slot {
    param: MaskParam,
    owner: Option<OwnerTag>,
    generation: u32,
}

/// Fixed-capacity registry of active masks.
///
/// One context belongs to one renderer; it is not shared between threads while drawing.
#[derive(Debug, Default)]
pub struct MaskContext {
    slots: [Option<Slot>; MAX_MASKS],
    generations: [u32; MAX_MASKS],
    order: SmallVec<[u8; MAX_MASKS]>,
}

impl MaskContext {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mask. Returns `None` when all [`MAX_MASKS`] slots are taken.
    pub fn add(&mut self, param: impl Into<MaskParam>, owner: Option<OwnerTag>) -> Option<MaskId> {
        let param = param.into();
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            tracing::warn!(kind = param.kind(), "mask registry full, mask dropped");
            return None;
        };
        let generation = self.generations[slot].wrapping_add(1);
        self.generations[slot] = generation;
        tracing::trace!(slot, kind = param.kind(), "mask added");
        self.slots[slot] = Some(Slot {
            param,
            owner,
            generation,
        });
        self.order.push(slot as u8);
        Some(MaskId {
            slot: slot as u8,
            generation,
        })
    }

    /// Remove a mask. Removing a stale handle is a no-op returning `None`.
    pub fn remove(&mut self, id: MaskId) -> Option<MaskParam> {
        let entry = self.slots.get_mut(id.slot())?;
        if entry.as_ref().map(|s| s.generation) != Some(id.generation) {
            return None;
        }
        let slot = entry.take()?;
        self.order.retain(|s| *s != id.slot);
        tracing::trace!(slot = id.slot(), kind = slot.param.kind(), "mask removed");
        Some(slot.param)
    }

    /// Remove every mask registered with `owner`; returns how many were removed.
    pub fn remove_owner(&mut self, owner: OwnerTag) -> usize {
        let mut removed = 0;
        for (i, entry) in self.slots.iter_mut().enumerate() {
            if entry.as_ref().is_some_and(|s| s.owner == Some(owner)) {
                *entry = None;
                self.order.retain(|s| usize::from(*s) != i);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::trace!(owner = owner.0, removed, "masks removed by owner");
        }
        removed
    }

    /// Look up an active mask.
    pub fn get(&self, id: MaskId) -> Option<&MaskParam> {
        self.slots
            .get(id.slot())?
            .as_ref()
            .filter(|s| s.generation == id.generation)
            .map(|s| &s.param)
    }

    /// Number of active masks.
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Return `true` when no mask is active.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fold every active mask, in registration order, into `buf`.
    ///
    /// `buf` is the run `[abs_x, abs_x + buf.len())` of row `abs_y`; callers normally fill
    /// it with [`OPA_COVER`](crate::OPA_COVER) first. Any mask excluding the whole run
    /// short-circuits to [`MaskResult::FullTransp`].
    pub fn apply(&self, buf: &mut [Opa], abs_x: Coord, abs_y: Coord) -> MaskResult {
        let mut changed = false;
        for &slot in &self.order {
            let Some(entry) = &self.slots[usize::from(slot)] else {
                continue;
            };
            match entry.param.apply(buf, abs_x, abs_y) {
                MaskResult::FullTransp => return MaskResult::FullTransp,
                MaskResult::Changed => changed = true,
                MaskResult::FullCover => {}
            }
        }
        if changed {
            MaskResult::Changed
        } else {
            MaskResult::FullCover
        }
    }

    /// Start a scope whose masks are removed when it is dropped.
    pub fn scope(&mut self) -> MaskScope<'_> {
        MaskScope {
            ctx: self,
            ids: SmallVec::new(),
        }
    }
}

/// Guard over a [`MaskContext`] that removes the masks it added on drop.
#[derive(Debug)]
pub struct MaskScope<'a> {
    ctx: &'a mut MaskContext,
    ids: SmallVec<[MaskId; 4]>,
}

impl MaskScope<'_> {
    /// Register a mask for the lifetime of this scope.
    pub fn add(&mut self, param: impl Into<MaskParam>) -> Option<MaskId> {
        let id = self.ctx.add(param, None)?;
        self.ids.push(id);
        Some(id)
    }

    /// Number of masks this scope added and still holds.
    pub fn owned(&self) -> usize {
        self.ids.len()
    }
}

impl Deref for MaskScope<'_> {
    type Target = MaskContext;

    fn deref(&self) -> &MaskContext {
        self.ctx
    }
}

impl Drop for MaskScope<'_> {
    fn drop(&mut self) {
        for id in self.ids.drain(..).rev() {
            self.ctx.remove(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/context.rs"]
mod tests;
