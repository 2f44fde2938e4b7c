/// Unique identifier for a body in the catalog.
/// Assigned in catalog order; stable for the lifetime of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
