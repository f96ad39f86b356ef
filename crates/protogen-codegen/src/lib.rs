//! Schema scanning and compiler invocation planning for protogen.
//!
//! Turns a tree of protocol buffer schemas into a deterministic plan:
//! `protoc` invocation descriptors built from per-target argument templates,
//! plus rendered aggregation files for targets that need one.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod paths;

pub mod planner;
pub mod renderer;
pub mod scanner;
pub mod targets;

pub use planner::{ArgTemplate, Planner, PlannerConfig};
pub use renderer::Renderer;
pub use scanner::{DirectoryGroups, Scanner, PROTO_EXTENSION};
pub use targets::{Golang, Target, TargetConfig, Typescript};
