use std::collections::HashMap;
use crate::renderer::texture::Texture;

/// Something drawn on a tile whose look can be rendered to a texture.
pub trait Appearance {
    /// Appearance id, shared by every thing that looks the same.
    fn id(&self) -> u32;

    /// Number of animation phases (at least one is assumed).
    fn animation_phases(&self) -> usize;

    fn current_animation_phase(&self) -> usize;

    /// Render one animation phase.
    fn generate_texture(&self, phase: usize) -> Texture;
}

/// Cache of generated tile textures.
///
/// Each node maps appearance ids to one child per animation phase, built
/// lazily on first lookup. Children of a node that has a texture start from
/// a copy of that texture's pixels; the copy is independent of later changes
/// to the parent.
#[derive(Debug, Clone, Default)]
pub struct TileTextureCache {
    texture: Option<Texture>,
    children: HashMap<u32, Vec<TileTextureCache>>,
}

impl TileTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_texture(texture: Texture) -> Self {
        Self {
            texture: Some(texture),
            children: HashMap::new(),
        }
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn texture_mut(&mut self) -> Option<&mut Texture> {
        self.texture.as_mut()
    }

    /// Child node for `item`'s current animation phase, populating all of
    /// its phases on first use. `None` if the current phase is out of range.
    pub fn get_cache(&mut self, item: &dyn Appearance) -> Option<&mut TileTextureCache> {
        let parent = self.texture.as_ref();
        let phases = self.children.entry(item.id()).or_insert_with(|| {
            let count = item.animation_phases().max(1);
            log::debug!("caching {count} phase(s) for appearance {}", item.id());
            (0..count)
                .map(|phase| {
                    let mut texture = item.generate_texture(phase);
                    if let Some(parent) = parent {
                        texture.upload_pixels(parent.image());
                    }
                    TileTextureCache::with_texture(texture)
                })
                .collect()
        });
        phases.get_mut(item.current_animation_phase())
    }

    /// Whether phases for appearance `id` have been built.
    pub fn contains(&self, id: u32) -> bool {
        self.children.contains_key(&id)
    }

    /// Number of cached appearances directly under this node.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use image::{Rgba, RgbaImage};

    struct Item {
        id: u32,
        phases: usize,
        phase: usize,
        generated: Cell<usize>,
    }

    impl Item {
        fn new(id: u32, phases: usize, phase: usize) -> Self {
            Self {
                id,
                phases,
                phase,
                generated: Cell::new(0),
            }
        }
    }

    impl Appearance for Item {
        fn id(&self) -> u32 {
            self.id
        }

        fn animation_phases(&self) -> usize {
            self.phases
        }

        fn current_animation_phase(&self) -> usize {
            self.phase
        }

        fn generate_texture(&self, phase: usize) -> Texture {
            self.generated.set(self.generated.get() + 1);
            Texture::new(RgbaImage::from_pixel(2, 2, Rgba([phase as u8, 0, 0, 255])))
        }
    }

    #[test]
    fn populates_all_phases_once() {
        let mut cache = TileTextureCache::new();
        let item = Item::new(7, 3, 2);

        let node = cache.get_cache(&item).unwrap();
        assert_eq!(node.texture().unwrap().pixel(0, 0), Some([2, 0, 0, 255]));
        assert_eq!(item.generated.get(), 3);

        cache.get_cache(&item).unwrap();
        assert_eq!(item.generated.get(), 3);
        assert!(cache.contains(7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn each_phase_has_its_own_texture() {
        let mut cache = TileTextureCache::new();
        let first = Item::new(7, 3, 0);
        let second = Item::new(7, 3, 1);
        let a = cache.get_cache(&first).unwrap().texture().cloned();
        let b = cache.get_cache(&second).unwrap().texture().cloned();
        assert_ne!(a, b);
    }

    #[test]
    fn children_copy_parent_pixels() {
        let parent = Texture::new(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])));
        let mut cache = TileTextureCache::with_texture(parent);
        let item = Item::new(1, 1, 0);

        let child = cache.get_cache(&item).unwrap();
        assert_eq!(child.texture().unwrap().pixel(3, 3), Some([9, 9, 9, 255]));

        // Mutating the parent afterwards leaves the child's snapshot alone.
        cache
            .texture_mut()
            .unwrap()
            .upload_pixels(&RgbaImage::from_pixel(4, 4, Rgba([1, 1, 1, 255])));
        let child = cache.get_cache(&item).unwrap();
        assert_eq!(child.texture().unwrap().pixel(0, 0), Some([9, 9, 9, 255]));
    }

    #[test]
    fn nested_lookup() {
        let mut cache = TileTextureCache::new();
        let ground = Item::new(100, 1, 0);
        let border = Item::new(200, 2, 1);

        let node = cache.get_cache(&ground).unwrap();
        let nested = node.get_cache(&border).unwrap();
        // The nested node starts from the ground's pixels.
        assert_eq!(nested.texture().unwrap().pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn out_of_range_phase_is_none() {
        let mut cache = TileTextureCache::new();
        let item = Item::new(3, 2, 5);
        assert!(cache.get_cache(&item).is_none());
        assert!(cache.contains(3));
    }
}
