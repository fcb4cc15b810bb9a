pub mod auth;
pub mod leaderboard;
pub mod submissions;
pub mod tasks;
