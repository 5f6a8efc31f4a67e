// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod achievements;
pub mod app_dirs;
pub mod config;
pub mod generator;
pub mod leaderboard;
pub mod runtime;
pub mod score;
pub mod session;
pub mod worm;
