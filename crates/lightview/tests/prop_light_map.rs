use glam::IVec2;
use lightview::{Claim, Color, LightMap, LightSource, MapCamera, Position, Size, Viewport};
use proptest::prelude::*;

fn dims() -> impl Strategy<Value = Size> {
    (1i32..=24, 1i32..=24).prop_map(|(w, h)| Size::new(w, h))
}

fn source(intensity: u8) -> LightSource {
    LightSource {
        pos: Position::new(10, 10, 7),
        center: IVec2::new(16, 16),
        color: Color::WHITE,
        radius: 64,
        intensity,
    }
}

fn positions() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::INVALID),
        (-70_000i32..70_000, -70_000i32..70_000, 0u8..=15).prop_map(|(x, y, z)| Position::new(x, y, z)),
        (80i32..120, 80i32..120, 0u8..=15).prop_map(|(x, y, z)| Position::new(x, y, z)),
    ]
}

proptest! {
    // Any world position, seen from any floor, maps to a valid slot or to nothing
    #[test]
    fn world_index_is_in_bounds(dim in dims(), pos in positions(), cam_z in 0u8..=15) {
        let cam = MapCamera::new(dim, 32).with_position(Position::new(100, 100, cam_z));
        let mut map = LightMap::default();
        map.resize(cam.draw_dimension());
        if let Some(index) = map.index_of(pos, &cam) {
            prop_assert!(index < map.len());
            prop_assert!(pos.is_valid());
        }
    }

    // Any point maps to a valid slot or to nothing
    #[test]
    fn point_index_is_in_bounds(dim in dims(), x in -2000i32..2000, y in -2000i32..2000, tile in 1i32..=64) {
        let map = LightMap::new(dim);
        if let Some(index) = map.index_of_point(IVec2::new(x, y), tile) {
            prop_assert!(index < map.len());
            prop_assert!(x >= 0 && y >= 0);
            prop_assert!(x / tile < dim.width && y / tile < dim.height);
        }
    }

    // Stored intensity only ever grows within a frame
    #[test]
    fn stored_intensity_is_running_max(dim in dims(), intensities in prop::collection::vec(0u8..=8, 1..20)) {
        let mut map = LightMap::new(dim);
        let index = map.len() - 1;
        let mut best: Option<u8> = None;
        for intensity in intensities {
            let claim = map.claim(index, source(intensity));
            match best {
                None => prop_assert_eq!(claim, Claim::Inserted),
                Some(b) if intensity > b => prop_assert_eq!(claim, Claim::Upgraded),
                Some(_) => prop_assert_eq!(claim, Claim::Dropped),
            }
            best = Some(best.map_or(intensity, |b| b.max(intensity)));
            prop_assert_eq!(map.get(index).map(|s| s.intensity), best);
        }
    }

    // Reset and drain both leave every slot empty
    #[test]
    fn reset_and_drain_empty_the_grid(dim in dims(), slots in prop::collection::vec(0usize..600, 0..40)) {
        let mut map = LightMap::new(dim);
        for &slot in &slots {
            map.claim(slot, source(4));
        }
        let occupied = map.occupied_count();
        prop_assert!(occupied <= slots.len());

        let mut drained = map.clone();
        prop_assert_eq!(drained.drain().count(), occupied);
        prop_assert_eq!(drained.occupied_count(), 0);

        map.reset();
        prop_assert_eq!(map.occupied_count(), 0);
        prop_assert_eq!(map.len(), dim.area());
    }
}
