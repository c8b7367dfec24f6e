//! Typed REST client for the forge API.
//!
//! One shared request engine ([`client::ForgeClient`]) plus thin
//! per-endpoint service wrappers, grouped the way the API documentation
//! groups them: issues, pull requests, repository, user.

pub mod client;
pub mod issues;
pub mod models;
pub mod pulls;
pub mod repository;
pub mod user;

pub use client::{
    success_created, success_get, success_modified, ApiConfig, ClientError, Expect, ForgeClient,
    Reply,
};
