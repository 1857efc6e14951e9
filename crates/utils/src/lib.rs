pub mod filename;
pub mod keygen;

pub use filename::*;
pub use keygen::*;
