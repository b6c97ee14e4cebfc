// Engine module - the algorithmic core of the logging facade
// (group resolution, visibility decisions, template rendering)
// This layer is pure logic: no I/O beyond capturing the call stack.

pub mod callsite;
pub mod error;
pub mod message;
pub mod resolve;
pub mod template;
pub mod visibility;

pub use callsite::extract_call_site;
pub use error::{Error, Result};
pub use message::{assemble, inspect};
pub use resolve::GroupRegistry;
pub use template::{CompiledTemplate, RenderContext, Renderer};
pub use visibility::{decide, ModeOverlay, VisibilityTable};
