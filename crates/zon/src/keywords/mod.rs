pub(crate) mod array;
pub(crate) mod deferred;
pub(crate) mod literal;
pub(crate) mod primitives;
pub(crate) mod record;
