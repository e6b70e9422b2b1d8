//! Repository sync port - produces the local working tree to deploy.

use std::path::PathBuf;

use crate::domain::value_objects::RepositoryDescriptor;
use crate::error::HoistResult;

/// Clone-or-update collaborator. Only the resulting path matters to the
/// rest of the pipeline.
pub trait RepositorySync {
    fn sync(&self, repo: &RepositoryDescriptor, token: Option<&str>) -> HoistResult<PathBuf>;
}

impl<T: RepositorySync + ?Sized> RepositorySync for &T {
    fn sync(&self, repo: &RepositoryDescriptor, token: Option<&str>) -> HoistResult<PathBuf> {
        (**self).sync(repo, token)
    }
}
