//! The drawing surface particles render onto.
//!
//! A [`Surface`] hands out one handle per particle. The simulation only ever
//! writes through a handle, never reads back, and gives the handle back
//! through [`Surface::destroy`] when the particle goes away. Handles are
//! move-only, so a destroyed handle can't be written to again.
//!
//! [`SpriteStore`] is the built-in surface: a slot table of GPU-ready
//! [`SpriteInstance`]s that the renderer uploads every frame.

use crate::color::Rgb;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Everything needed to first draw a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Top-left anchored position in layout pixels.
    pub position: Vec2,
    /// Diameter in layout pixels.
    pub size: f32,
    pub opacity: f32,
    pub color: Rgb,
}

/// A render target that owns one visual element per particle.
pub trait Surface {
    /// Handle to one visual element.
    type Handle;

    /// Create a visual element and return its handle.
    fn create(&mut self, sprite: &Sprite) -> Self::Handle;

    /// Move, resize and re-fade an existing element. Color never changes.
    fn update(&mut self, handle: &Self::Handle, position: Vec2, size: f32, opacity: f32);

    /// Release an element.
    fn destroy(&mut self, handle: Self::Handle);
}

/// GPU instance data for one sprite.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: f32,
    pub opacity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl From<&Sprite> for SpriteInstance {
    fn from(sprite: &Sprite) -> Self {
        Self {
            position: sprite.position.to_array(),
            size: sprite.size,
            opacity: sprite.opacity,
            color: sprite.color.to_vec3().to_array(),
            _pad: 0.0,
        }
    }
}

/// Handle into a [`SpriteStore`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

impl SlotId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Slot-table surface backing the GPU renderer.
///
/// Freed slots are recycled, so the table never grows past the peak live
/// population.
#[derive(Debug, Default)]
pub struct SpriteStore {
    slots: Vec<Option<SpriteInstance>>,
    free: Vec<u32>,
    live: usize,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sprites.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Look up a live sprite by handle.
    pub fn get(&self, handle: &SlotId) -> Option<&SpriteInstance> {
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    /// Live sprites in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &SpriteInstance> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Pack live sprites into `out`, replacing its contents.
    pub fn write_instances(&self, out: &mut Vec<SpriteInstance>) {
        out.clear();
        out.extend(self.iter().copied());
    }
}

impl Surface for SpriteStore {
    type Handle = SlotId;

    fn create(&mut self, sprite: &Sprite) -> SlotId {
        let instance = SpriteInstance::from(sprite);
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(instance);
                SlotId(index)
            }
            None => {
                self.slots.push(Some(instance));
                SlotId(self.slots.len() as u32 - 1)
            }
        }
    }

    fn update(&mut self, handle: &SlotId, position: Vec2, size: f32, opacity: f32) {
        if let Some(Some(instance)) = self.slots.get_mut(handle.index()) {
            instance.position = position.to_array();
            instance.size = size;
            instance.opacity = opacity;
        }
    }

    fn destroy(&mut self, handle: SlotId) {
        if let Some(slot) = self.slots.get_mut(handle.index()) {
            if slot.take().is_some() {
                self.live -= 1;
                self.free.push(handle.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(x: f32) -> Sprite {
        Sprite {
            position: Vec2::new(x, 0.0),
            size: 4.0,
            opacity: 0.5,
            color: Rgb::new(255, 128, 0),
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
    }

    #[test]
    fn test_create_update_destroy() {
        let mut store = SpriteStore::new();
        let a = store.create(&sprite(1.0));
        let b = store.create(&sprite(2.0));
        assert_eq!(store.len(), 2);

        store.update(&a, Vec2::new(10.0, 20.0), 6.0, 0.25);
        let inst = store.get(&a).unwrap();
        assert_eq!(inst.position, [10.0, 20.0]);
        assert_eq!(inst.size, 6.0);
        assert_eq!(inst.opacity, 0.25);
        assert!((inst.color[0] - 1.0).abs() < 1e-6);

        store.destroy(a);
        assert_eq!(store.len(), 1);
        assert_eq!(store.iter().count(), 1);
        assert_eq!(store.get(&b).unwrap().position, [2.0, 0.0]);
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut store = SpriteStore::new();
        let handles: Vec<_> = (0..4).map(|i| store.create(&sprite(i as f32))).collect();
        for h in handles {
            store.destroy(h);
        }
        assert!(store.is_empty());

        for i in 0..4 {
            store.create(&sprite(i as f32));
        }
        assert_eq!(store.len(), 4);
        assert_eq!(store.capacity(), 4);
    }

    #[test]
    fn test_write_instances() {
        let mut store = SpriteStore::new();
        let a = store.create(&sprite(1.0));
        store.create(&sprite(2.0));
        store.destroy(a);

        let mut out = vec![SpriteInstance::zeroed(); 8];
        store.write_instances(&mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].position, [2.0, 0.0]);
    }
}
