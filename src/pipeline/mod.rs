pub mod accents;
pub mod extract;
pub mod readable;
