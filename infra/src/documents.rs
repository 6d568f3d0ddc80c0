use serde::{Deserialize, Serialize};

use crate::ids::{Entity, Id};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(bound = "T: Entity")]
pub struct DocMeta<T> {
    pub id: Id<T>,
}

/// Anything that carries its own identity.
pub trait HasMeta: Entity + Sized {
    fn meta(&self) -> &DocMeta<Self>;

    fn id(&self) -> Id<Self> {
        self.meta().id
    }
}

impl<T> DocMeta<T> {
    pub fn new_with_id(id: Id<T>) -> Self {
        DocMeta { id }
    }
}
