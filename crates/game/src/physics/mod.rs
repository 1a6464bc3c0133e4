mod collision;
mod obstacle;

pub use collision::{CollisionResolver, Contact};
pub use obstacle::MovingObstacle;
