pub(crate) mod map;
pub(crate) mod policies;
