#[cfg(feature = "core")]
#[doc(inline)]
pub use seqloc_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use seqloc_io as io;
