//! Model types for openaudio-state

mod catalogue;
mod device;
mod input;
mod zone;

pub use catalogue::SourceCatalogue;
pub use device::Device;
pub use input::Input;
pub use zone::Zone;
