pub mod handlers;
pub mod library;
pub mod middleware;
pub mod movies;
pub mod routes;
pub mod suggest;

pub use routes::create_router;
