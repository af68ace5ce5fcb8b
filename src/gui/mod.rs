mod app;
mod camera;
mod config;
mod draw;
mod fps_limit;
mod ticker;

pub use app::App;
pub use camera::Camera;
pub use config::Config;
use fps_limit::FpsLimiter;
pub use ticker::{Ticker, TimeScale};
