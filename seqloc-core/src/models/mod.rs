pub mod agp;
pub mod compound;
pub mod location;
pub mod sequence;

// re-export for cleaner imports
pub use self::agp::AgpRow;
pub use self::compound::{CompoundLocation, Operator};
pub use self::location::{
    Base, Between, GAP_FILL_SYMBOL, Gap, Location, Origin, Range, UNKNOWN_GAP_LENGTH,
    flip_partials,
};
pub use self::sequence::{Sequence, Topology};
