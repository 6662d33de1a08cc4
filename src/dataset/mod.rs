mod cluster;
mod color;
mod model;
mod parse;
mod source;
mod transform;

pub use cluster::cluster_isolates;
pub use model::{GraphDataset, Level, Link, Node};
#[cfg(test)]
pub(crate) use model::{test_link, test_node};
pub use parse::parse_dataset;
pub use source::{DatasetSource, FileSource};
pub use transform::normalize;
