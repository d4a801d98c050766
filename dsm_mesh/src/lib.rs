//! Converts a Digital Surface Model raster into a quad mesh written as PLY.
//!
//! The pipeline is: read a [`HeightGrid`] (and optionally a [`ColorGrid`]),
//! number the finite cells ([`VertexIndexGrid`]), build a [`GridMesh`] that
//! knows its vertex and face counts, then stream it with [`write_ply`].

pub mod error;
pub mod faces;
pub mod geometry;
pub mod index;
pub mod io;
pub mod mesh;
pub mod raster;

pub use error::{MeshError, Result};
pub use faces::{count_quads, quad_at, quads, Quad};
pub use geometry::{grid_to_model, Point3};
pub use index::VertexIndexGrid;
pub use io::ply::{save_ply, write_ply, PlyEncoding};
pub use mesh::{GridMesh, MeshOptions, MeshSummary, MeshVertex};
pub use raster::{ColorGrid, HeightGrid, MISSING_COLOR};
