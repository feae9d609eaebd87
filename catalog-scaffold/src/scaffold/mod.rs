//! CRUD catalog scaffolding
//!
//! Turns an introspected table into a model, controller, form request,
//! permissions seeder and four UI pages, and registers the resource route.

pub mod fragments;
pub mod generator;
pub mod helpers;
pub mod output;
pub mod routes;
pub mod templates;
pub mod type_map;

pub use generator::{ArtifactKind, GeneratedFile, GenerationReport, ScaffoldGenerator};
pub use helpers::{ModelNames, TemplateHelpers};
pub use routes::{ImportPlacement, RouteDialect, RoutePatch, RoutesRegistry};
pub use templates::{
    Bindings, EmbeddedStubs, StubDirectory, TemplateRenderer, TemplateSource, UnboundPlaceholders,
};
pub use type_map::{SqlTypeFamily, ValidationRule};
