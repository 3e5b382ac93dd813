pub(crate) mod database;
pub(crate) mod git;
pub(crate) mod system;
