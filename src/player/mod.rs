mod traits;

pub use traits::PlayerSurface;
