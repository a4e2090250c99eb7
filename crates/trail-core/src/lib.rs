pub mod assembler;
pub mod config;
pub mod constants;
pub mod edges;
pub mod emission;
pub mod points;
pub mod redraw;
pub mod style;
pub mod trail;
pub static TRAIL_WGSL: &str = include_str!("../shaders/trail.wgsl");

pub use assembler::*;
pub use config::*;
pub use constants::*;
pub use edges::*;
pub use emission::*;
pub use points::*;
pub use redraw::*;
pub use style::*;
pub use trail::*;
