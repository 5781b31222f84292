//! # agent-core
//!
//! Tool framework shared by the logistics specialists.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      ToolRegistry                         │
//! │  ┌──────────┐   validate   ┌──────────┐   ToolResult      │
//! │  │ ToolCall │ ───────────▶ │   Tool   │ ───────────▶ status│
//! │  └──────────┘              └──────────┘   + data map      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A tool is a named operation taking keyword arguments. The status carried by
//! every `ToolResult` separates "nothing found" from "could not compute", so the
//! caller can branch without inspecting messages.

pub mod error;
pub mod tool;

pub use error::{AgentError, Result};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema, ToolStatus};
