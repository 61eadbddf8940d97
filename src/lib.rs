pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod group;
pub mod optimizer;
pub mod plan;
pub mod problem;
pub mod scorer;
pub mod verifier;
// cmd and reports belong to the binary (main.rs).
