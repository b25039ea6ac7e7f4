pub mod pack;
pub mod pictogram;
pub mod scale;
