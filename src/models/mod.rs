pub mod activity;
pub mod budget;
pub mod event;
