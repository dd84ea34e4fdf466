mod point;

pub use point::*;
