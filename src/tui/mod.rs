pub mod app;
pub mod editor;
pub mod events;
pub mod theme;
pub mod timer;
pub mod widgets;
