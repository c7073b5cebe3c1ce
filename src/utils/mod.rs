// Utils compartidos

pub mod constants;
#[cfg(target_arch = "wasm32")]
pub mod google_maps_ffi;
pub mod i18n;

pub use constants::*;
pub use i18n::*;
