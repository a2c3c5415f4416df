pub mod tape;

pub use tape::{Cursor, Tape, PAGE_SIZE};
