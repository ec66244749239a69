pub mod usage;
pub mod user;

pub use usage::PgUsageStore;
pub use user::PgUserStore;
