//! Network byte-order codec for the PostgreSQL wire protocol
//!
//! Converts fixed-width integers and IEEE-754 floats between host order and
//! the big-endian order used on the wire.
//!
//! # Layers
//!
//! - [`swap`]: byte-swap primitives, plus a mask-and-shift 64-bit fallback
//! - [`network`]: total loads/stores over fixed-size arrays
//! - [`scalar`]: the [`NetworkScalar`] trait and bounds-checked offset access
//!
//! ```
//! use pq_bytes::{load_network_i32, read_network, to_network_i32};
//!
//! let wire = to_network_i32(0x0102_0304).to_ne_bytes();
//! assert_eq!(wire, [1, 2, 3, 4]);
//! assert_eq!(load_network_i32(&wire), 0x0102_0304);
//!
//! let frame = [b'D', 0, 0, 0, 6];
//! assert_eq!(read_network::<i32>(&frame, 1).unwrap(), 6);
//! ```

pub mod error;
pub mod network;
pub mod scalar;
pub mod swap;

pub use error::{CodecError, Result};
pub use network::*;
pub use scalar::{read_network, write_network, NetworkScalar};
pub use swap::*;
