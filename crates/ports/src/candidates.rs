// crates/ports/src/candidates.rs
use suite_select_shared_kernel::{CandidateFile, InfraResult};

pub type CandidateIter<'a> = Box<dyn Iterator<Item = InfraResult<CandidateFile>> + 'a>;

/// Port for enumerating candidate files. An `Err` item means the tree itself
/// could not be read and ends the scan.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self) -> CandidateIter<'_>;
}

impl CandidateSource for Vec<CandidateFile> {
    fn candidates(&self) -> CandidateIter<'_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}
