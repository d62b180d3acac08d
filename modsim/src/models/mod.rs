pub mod glucose;
pub mod growth;
pub mod penny;
pub mod projectile;
pub mod swing;

pub use glucose::{GlucoseState, MinimalModel};
pub use growth::{PopulationState, QuadraticGrowth};
pub use penny::{FallingPenny, PennyState, QuadraticDrag};
pub use projectile::{BallState, Baseball};
pub use swing::{CableSwing, SwingState};
