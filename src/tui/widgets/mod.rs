pub mod catalog;
pub mod checklist;
pub mod header;
pub mod notes;
pub mod progress;
pub mod resources;
pub mod schedule;
pub mod stats;
pub mod statusbar;
pub mod tabs;
