mod candidate;
mod category;
mod item;

pub use candidate::{ItemCandidate, ValidationError, parse_decimal_text};
pub use category::Category;
pub use item::{Item, ItemId, NewItem};
