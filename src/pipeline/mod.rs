pub mod cleaner;
pub mod compositor;
pub mod config;
pub mod pipeline;
pub mod region_filler;
pub mod scan;
pub mod tiles;

pub use cleaner::{CleanStats, ComponentCleaner};
pub use compositor::Compositor;
pub use config::PipelineConfig;
pub use pipeline::{CrackMaskPipeline, PipelineOutput};
pub use region_filler::RegionFiller;
pub use scan::{PatchScanner, ScanSummary};
pub use tiles::{tiles, Tile};
