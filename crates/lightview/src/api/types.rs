use glam::IVec2;

/// Highest floor index a valid position may carry.
pub const MAX_Z: u8 = 15;

/// World tile position: column, row and floor.
///
/// Lower `z` is a higher floor. The `INVALID` sentinel marks an empty
/// light-map slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: u8,
}

impl Position {
    pub const INVALID: Self = Self {
        x: 65535,
        y: 65535,
        z: 255,
    };

    pub fn new(x: i32, y: i32, z: u8) -> Self {
        Self { x, y, z }
    }

    pub fn is_valid(&self) -> bool {
        (0..65535).contains(&self.x) && (0..65535).contains(&self.y) && self.z <= MAX_Z
    }

    /// Same floor, shifted by `(dx, dy)` tiles.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }

    /// Shifted by `(dx, dy)` tiles and `dz` floors. Returns `INVALID` when
    /// the floor leaves `0..=MAX_Z`.
    pub fn translated_z(&self, dx: i32, dy: i32, dz: i32) -> Self {
        let z = self.z as i32 + dz;
        if !(0..=MAX_Z as i32).contains(&z) {
            return Self::INVALID;
        }
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: z as u8,
        }
    }

    /// Neighbor one step in `direction`.
    pub fn translated_to_direction(&self, direction: Direction) -> Self {
        let offset = direction.offset();
        self.translated(offset.x, offset.y)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Facing / walking direction of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// Tile step for this direction (y grows southwards).
    pub fn offset(self) -> IVec2 {
        match self {
            Self::North => IVec2::new(0, -1),
            Self::East => IVec2::new(1, 0),
            Self::South => IVec2::new(0, 1),
            Self::West => IVec2::new(-1, 0),
            Self::NorthEast => IVec2::new(1, -1),
            Self::SouthEast => IVec2::new(1, 1),
            Self::SouthWest => IVec2::new(-1, 1),
            Self::NorthWest => IVec2::new(-1, -1),
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
            Self::NorthWest => Self::SouthEast,
        }
    }
}

/// A light emission as described by the map: intensity (normally 0-8) and
/// a palette-indexed color byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Light {
    pub intensity: u8,
    pub color: u8,
}

impl Light {
    pub fn new(intensity: u8, color: u8) -> Self {
        Self { intensity, color }
    }
}

/// Integer width/height pair, used for both pixel and tile-grid sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cells; zero for empty or negative dimensions.
    pub fn area(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as usize * self.height as usize
    }
}

/// Axis-aligned pixel rectangle (top-left + size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(top_left: IVec2, size: Size) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}
