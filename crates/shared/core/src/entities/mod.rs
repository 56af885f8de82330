mod horse;

pub use horse::{DEFAULT_BREED, DEFAULT_COAT_COLOUR, DEFAULT_EQUIPMENT, DEFAULT_SYMBOL, Horse};
