mod extrude;
mod mesh;
pub mod path;
mod shape;
mod triangulate;

pub use extrude::{extrude, ExtrudeOptions};
pub use mesh::MeshData;
pub use path::{Path2, Segment};
pub use shape::{Shape, ShapePoints};
pub use triangulate::triangulate;
