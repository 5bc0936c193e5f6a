pub mod console;
pub mod game;
pub mod game_genre;
pub mod game_instance;
pub mod genre;
pub mod instance_status;

pub use instance_status::InstanceStatus;
