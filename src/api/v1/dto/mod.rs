pub mod hackathons;
pub mod results;
pub mod scores;
pub mod users;
