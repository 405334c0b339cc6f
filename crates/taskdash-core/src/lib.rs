pub mod api;
pub mod config;
pub mod controller;
pub mod forms;
pub mod query;
pub mod render;

pub use controller::{
  Dashboard,
  Effect,
  Modal,
  Msg,
  RequestKind,
  SubmitButton
};
