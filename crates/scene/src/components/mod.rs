pub mod color;
pub mod drawable3d;
pub mod lines;
pub mod transform;

pub use color::*;
pub use drawable3d::*;
pub use lines::*;
pub use transform::*;
