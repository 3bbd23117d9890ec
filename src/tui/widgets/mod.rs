pub mod calendar;
pub mod header;
pub mod reward;
pub mod statusbar;
