pub mod lookup;
pub mod predict;
pub mod serve;

pub use lookup::lookup;
pub use predict::predict;
pub use serve::serve;
