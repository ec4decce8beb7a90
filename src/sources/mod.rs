pub mod loader;

pub use loader::load_user_sources;
