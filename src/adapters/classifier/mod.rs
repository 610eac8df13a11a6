//! Classification backends
//!
//! Everything that talks to a model server lives here: the wire types, the
//! shared HTTP transport with its endpoint fallback, and the concrete
//! providers behind the [`ClassifierProvider`] trait.

pub mod models;
pub mod ollama;
pub mod provider;
pub mod transport;
pub mod vision;

pub use ollama::OllamaProvider;
pub use provider::{create_provider, ClassifierProvider, ImageDescriber};
pub use transport::InferenceTransport;
pub use vision::VisionModelProvider;
