// Career guidance: literal profile classification, canned recommendations,
// mock market trend, markdown rendering and the form handlers.
// No provider calls happen here.

pub mod classifier;
pub mod form;
pub mod handlers;
pub mod recommendations;
pub mod render;
pub mod submission;
pub mod trend;
