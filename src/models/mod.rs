mod map;
mod search;
mod slots;
mod spot;

pub use map::*;
pub use search::*;
pub use slots::*;
pub use spot::*;
