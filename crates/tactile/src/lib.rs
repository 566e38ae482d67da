#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use tactile_image as image;

#[doc(inline)]
pub use tactile_3d as k3d;

#[doc(inline)]
pub use tactile_tracking as tracking;
