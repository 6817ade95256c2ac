pub mod area;
pub mod candidate;
pub mod geometry;
pub mod session;

pub use area::{Area, AreaOrigin, AREA_COLORS};
pub use candidate::SearchCandidate;
pub use geometry::{BoundingBox, LonLat, Polygon, Ring};
pub use session::{MapView, SessionSnapshot, ViewMode};
