// Domain layer - Risk zones and the charts built from them
pub mod board;
pub mod bucketizer;
pub mod downsample;
pub mod risk;
pub mod series;
pub mod timeline;
