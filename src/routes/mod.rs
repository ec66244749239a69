pub mod health;
pub mod response;
pub mod translate;
pub mod user;
