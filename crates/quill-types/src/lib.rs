pub mod callsite;
pub mod display;
pub mod mode;
pub mod sink;
pub mod value;

pub use callsite::*;
pub use display::*;
pub use mode::*;
pub use sink::*;
pub use value::*;

/// Reserved pseudo-section and pseudo-type used for wildcard rules in
/// visibility tables and output maps.
pub const DEFAULT_KEY: &str = "_default";
