//! OpenAPI / Swagger document model and endpoint extraction.
//!
//! Layers, leaf first:
//!
//! - `spec`, `schema`: serde model of the document; schemas become [`SchemaNode`]
//! - `resolve`: `$ref` resolution into reference-free [`ResolvedSchema`] trees
//! - `render`: TypeScript type text for resolved trees
//! - `naming`: identifiers derived from path templates and methods
//! - `endpoint`, `extract`: one [`EndpointDescriptor`] per operation
//! - `merge`: several documents into one [`ApiModel`]

pub mod endpoint;
pub mod extract;
pub mod merge;
pub mod naming;
mod render;
pub mod resolve;
pub mod schema;
pub mod spec;

pub use endpoint::{EndpointDescriptor, HttpMethod, ParamLocation, ParameterDescriptor};
pub use extract::{Extraction, extract};
pub use merge::{ApiModel, DocumentSummary, merge};
pub use resolve::{NamedSchema, ResolvedSchema, Resolver};
pub use schema::SchemaNode;
pub use spec::{SpecDocument, SpecFormat};
