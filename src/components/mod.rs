pub mod app;
pub mod figure;

pub use app::App;
