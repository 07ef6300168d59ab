use rand::Rng;
use rand::seq::SliceRandom;

/// What occupies a single grid cell.
///
/// `Start`, `Finish` and `Path` never come out of a generator; they are written into a copy
/// of a maze when a solved route is drawn over it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellKind {
    Wall,
    Passage,
    Start,
    Finish,
    Path,
}

impl CellKind {
    /// Every kind except `Wall` can be walked on.
    #[inline]
    pub fn is_passable(self) -> bool {
        self != CellKind::Wall
    }
}

impl Default for CellKind {
    fn default() -> CellKind {
        CellKind::Wall
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    /// All four directions in a uniformly random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> [CompassPrimary; 4] {
        let mut dirs = CompassPrimary::ALL;
        dirs.shuffle(rng);
        dirs
    }
}
