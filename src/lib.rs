#![doc = "The `dotask` library crate."]
#![doc = ""]
#![doc = "Contains the token service, the gate-based access control chain, domain"]
#![doc = "models, route handlers, configuration and error handling for the DoTask"]
#![doc = "backend. The binary (`main.rs`) wires these into a running server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
