mod extract;
mod handler;
mod models;

pub use handler::upload_file;
