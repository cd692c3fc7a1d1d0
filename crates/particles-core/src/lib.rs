pub mod animator;
pub mod classifier;
pub mod color;
pub mod constants;
pub mod director;
pub mod gesture;
pub mod shapes;
pub mod state;
pub mod targets;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animator::*;
pub use classifier::*;
pub use color::*;
pub use constants::*;
pub use director::*;
pub use gesture::*;
pub use shapes::*;
pub use state::*;
pub use targets::*;
