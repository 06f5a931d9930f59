//! Business logic services

pub mod audio;
pub mod clock;
pub mod external;
pub mod study;
pub mod word_lists;
