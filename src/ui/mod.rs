pub mod event;
pub mod navigation;
pub mod response;
pub mod router;
pub mod screens;
