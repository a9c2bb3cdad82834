//! Simulation core: physics, pipes, aiming and the game state machine.
//!
//! Nothing in here draws, plays sound or touches the terminal. The frontend
//! feeds pointer input and frame deltas in, and reads [`view::FrameView`]
//! snapshots and [`events::GameEvent`]s out.

pub mod aim;
pub mod constants;
pub mod events;
pub mod kinematics;
pub mod pipes;
pub mod session;
pub mod trajectory;
pub mod types;
pub mod view;

pub use aim::{AimGesture, PullVector};
pub use constants::{GameConfig, Physics};
pub use events::{route_audio, AudioSink, GameEvent, GameOverReason};
pub use pipes::{PipeField, PipeGeometry, PipePair};
pub use session::GameSession;
pub use trajectory::Trajectory;
pub use types::{BirdState, GamePhase, Point, RunStats, WorldState};
pub use view::FrameView;
