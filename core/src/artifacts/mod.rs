pub(crate) mod activities;
