pub mod classify;
pub mod consts;
pub mod detector;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod recorder;
pub mod rules;
pub mod sampler;
pub mod session;
pub mod snapshot;
pub mod stage;
pub mod timestamp;
