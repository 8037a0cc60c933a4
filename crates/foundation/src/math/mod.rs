pub mod local;
pub mod quat;
pub mod spherical;
pub mod vec;

pub use local::*;
pub use quat::*;
pub use spherical::*;
pub use vec::*;
