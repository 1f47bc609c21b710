pub mod catalogo;
pub mod docs;
pub mod progreso;
pub mod vista;

pub use catalogo::*;
pub use docs::*;
pub use progreso::*;
pub use vista::*;
