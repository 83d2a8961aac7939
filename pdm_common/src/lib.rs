mod centavos;
mod secret;

pub use centavos::{Centavos, CentavosConversionError};
pub use secret::Secret;
