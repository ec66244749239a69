mod handler;
mod model;

pub use handler::translate;
