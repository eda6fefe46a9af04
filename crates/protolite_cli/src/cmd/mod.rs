/// Default-instance array command.
pub mod defaults;
/// Array decode and display command.
pub mod decode;
/// Decode then re-serialize command.
pub mod normalize;
/// Message tree rendering helpers.
pub mod print;
/// Schema inspection command.
pub mod schema;
#[cfg(test)]
pub(crate) mod test_support;
/// Shared CLI helpers.
pub mod util;
