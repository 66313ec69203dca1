/// Backend trait, frame type and factory.
pub mod backend;
/// `vello_cpu` raster backend.
pub mod cpu;
/// Stable plan hashing.
pub mod fingerprint;
