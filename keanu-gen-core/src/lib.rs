//! keanu-gen core library: condition model, type descriptors, engine
//! interface, configuration.
//!
//! - [`condition`]: condition axes and their groupings
//! - [`types`]: [`TypeDescriptor`], [`MatrixType`], the built-in [`TypeCatalogue`]
//! - [`engine`]: the [`TemplateEngine`] trait the generator drives
//! - [`config`]: defaults / config file / command-line resolution
//! - [`error`]: [`ConfigError`]

pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;

pub use condition::{Architecture, AxisKind, Condition, ConditionAxis, OperatingSystem};
pub use config::{GeneratorConfig, Overrides};
pub use engine::{BlockOutcome, RenderContext, TemplateEngine, TemplateId};
pub use error::ConfigError;
pub use types::{ConditionSet, MatrixType, TypeCatalogue, TypeDescriptor, TypeName};
