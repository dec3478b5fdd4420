pub mod impl_file;
#[cfg(test)]
pub mod impl_memory;
pub mod interface;
