//! # Rendering Module
//!
//! Bitmap handling for thermal printers.
//!
//! - [`raster`]: thresholding images to 1-bpp raster data and back to PNG
//!
//! ## Usage Example
//!
//! ```no_run
//! use recibo::render::RasterImage;
//! use recibo::protocol::graphics;
//!
//! let logo = RasterImage::open("logo.png").unwrap();
//! let cmd = graphics::store_raster(logo.width as u16, logo.height as u16, &logo.data);
//! ```

pub mod raster;

pub use raster::RasterImage;
