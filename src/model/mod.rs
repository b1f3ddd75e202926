pub mod game_state;
pub mod inventory;
pub mod message;
pub mod scene;
pub mod session;
pub mod setup;
