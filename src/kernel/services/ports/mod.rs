//! Service ports: traits + data contracts.

pub mod probe;
pub mod settings;

pub use probe::FsProbe;
pub use settings::Settings;
