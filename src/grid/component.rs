use std::fmt;

/// One of the three cartesian axes of the computational domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// position of this axis in an `(i, j, k)` index triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// decode the axis selector stored in flattened edge indices (0, 1 or 2)
    pub fn from_selector(selector: u64) -> Option<Axis> {
        match selector {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A staggered field location of the Yee cell.
///
/// Electric components sit on cell edges and magnetic components on cell faces,
/// each one offset along its own axis. Material runs for a component always
/// extend along that component's axis, so `Ex` runs advance in `i`, `Ey` runs
/// in `j` and `Ez` runs in `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YeeComponent {
    Ex,
    Ey,
    Ez,
    Hx,
    Hy,
    Hz,
}

impl YeeComponent {
    /// every component, in the order they are stored in mesh files
    pub const ALL: [YeeComponent; 6] = [
        YeeComponent::Ex,
        YeeComponent::Ey,
        YeeComponent::Ez,
        YeeComponent::Hx,
        YeeComponent::Hy,
        YeeComponent::Hz,
    ];

    pub fn electric(axis: Axis) -> Self {
        match axis {
            Axis::X => YeeComponent::Ex,
            Axis::Y => YeeComponent::Ey,
            Axis::Z => YeeComponent::Ez,
        }
    }

    pub fn magnetic(axis: Axis) -> Self {
        match axis {
            Axis::X => YeeComponent::Hx,
            Axis::Y => YeeComponent::Hy,
            Axis::Z => YeeComponent::Hz,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            YeeComponent::Ex | YeeComponent::Hx => Axis::X,
            YeeComponent::Ey | YeeComponent::Hy => Axis::Y,
            YeeComponent::Ez | YeeComponent::Hz => Axis::Z,
        }
    }

    pub fn is_electric(self) -> bool {
        matches!(
            self,
            YeeComponent::Ex | YeeComponent::Ey | YeeComponent::Ez
        )
    }

    /// position of this component in [`YeeComponent::ALL`]
    pub fn index(self) -> usize {
        let offset = if self.is_electric() { 0 } else { 3 };
        offset + self.axis().index()
    }
}

impl fmt::Display for YeeComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = if self.is_electric() { 'E' } else { 'H' };
        write!(f, "{}{}", field, self.axis())
    }
}
