pub mod clock;
pub mod config;
pub mod contact;
pub mod logging;
pub mod particles;
pub mod scroll;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(not(target_arch = "wasm32"))]
pub mod server;
