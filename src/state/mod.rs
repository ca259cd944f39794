pub mod pan;
pub mod viewport;

pub use pan::PanSession;
pub use viewport::Viewport;
