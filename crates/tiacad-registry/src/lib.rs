//! Part registry and transform tracker for TiaCAD: the append-only,
//! order-preserving map of named solids built during a compilation, plus
//! the cumulative-transform bookkeeping and appearance metadata rules that
//! ride alongside each part.

pub mod error;
pub mod metadata;
pub mod part;
pub mod registry;
pub mod view;

pub use error::{RegistryError, RegistryErrorKind, RegistryResult};
pub use metadata::{Appearance, PartMetadata};
pub use part::Part;
pub use registry::PartRegistry;
pub use view::RegistryView;
