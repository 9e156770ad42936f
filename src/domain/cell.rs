/// Cell represents the fundamental unit in Brian's Brain.
/// Each cell is Alive (firing), Dying (refractory) or Off (ready).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Cell {
    Alive,
    Dying,
    #[default]
    Off,
}

impl Cell {
    /// Every state, in rule order
    pub const ALL: [Cell; 3] = [Cell::Alive, Cell::Dying, Cell::Off];

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Pure function to compute the next state based on Brian's Brain:
    /// 1. Alive cells always start dying
    /// 2. Dying cells always switch off
    /// 3. Off cells with exactly 2 alive neighbors fire
    pub const fn evolve(self, alive_neighbors: u8) -> Self {
        match (self, alive_neighbors) {
            (Cell::Alive, _) => Cell::Dying,
            (Cell::Dying, _) => Cell::Off,
            (Cell::Off, 2) => Cell::Alive,
            (Cell::Off, _) => Cell::Off,
        }
    }

    /// RGB color used when rendering this state into a frame
    pub const fn color(self) -> [u8; 3] {
        match self {
            Cell::Alive => [255, 255, 255],
            Cell::Dying => [255, 0, 0],
            Cell::Off => [0, 0, 0],
        }
    }
}
