//! HTTP surface for ragshelf: `POST /query` answers a batch of questions,
//! `GET /health` reports liveness.

pub mod rest;

pub use rest::{routes, RestApi};
