pub mod agent;
pub mod bot;
pub mod commands;
pub mod constants;
pub mod interaction;
pub mod personality;
pub mod prompt;
pub mod state;
