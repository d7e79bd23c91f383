//! Graph construction and change-set analysis

pub mod builder;
pub mod change_set;
pub mod parallel;
pub mod resolver;

pub use builder::{BuildOptions, PackageGraphBuilder};
pub use change_set::ChangeSetMapper;
pub use parallel::ProgressUpdate;
pub use resolver::ReverseDependencyResolver;
