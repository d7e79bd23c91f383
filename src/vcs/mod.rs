//! Version-control collaborator supplying changed file lists

pub mod system_git;

pub use system_git::SystemGit;
