pub mod hackathons;
pub mod health;
pub mod me;
pub mod results;
pub mod scores;
pub mod users;
