pub mod finalize;
