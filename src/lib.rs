//! Quasiperiodic (Penrose-like) tilings of the plane, computed either by
//! slicing an n-dimensional integer lattice with a 2D cutting plane
//! (cut-and-project) or by intersecting n families of parallel grid
//! lines (de Bruijn multigrid).
//!
//! Both methods consume a [`TilingState`] and produce the same list of
//! rhombic [`Face`]s; see [`Generator`].

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate log;

#[cfg(feature = "render")]
extern crate cairo;

//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling

pub mod errors {

    error_chain!{

        foreign_links {
            Fmt(::std::fmt::Error);
            Io(::std::io::Error);
            Base64(::base64::DecodeError);
            Cairo(::cairo::Error) #[cfg(feature = "render")];
            CairoIo(::cairo::IoError) #[cfg(feature = "render")];
        }

        errors {

            UnsupportedVersion(version: u8) {
                description("unsupported state format version")
                display("unsupported state format version: {}", version)
            }

            UnsupportedDims(dims: usize) {
                description("unsupported dimension")
                display("unsupported dimension: {}", dims)
            }

            Truncated(needed: usize, got: usize) {
                description("truncated state buffer")
                display("truncated state buffer: need {} bytes, got {}", needed, got)
            }

            LengthMismatch(what: &'static str, expected: usize, got: usize) {
                description("vector length mismatch")
                display("{} has {} components, expected {}", what, got, expected)
            }

            InvalidColor(color: String) {
                description("invalid color")
                display("invalid color: {:?} (expected #rrggbb)", color)
            }

        }

    }

}

//////////////////////////////////////////////////////////////////////
// pull in some types from nalgebra

pub type Vec2d = nalgebra::Vector2<f64>;
pub type VecNd = nalgebra::DVector<f64>;
pub type Point2d = nalgebra::geometry::Point2<f64>;

pub mod vector;
pub mod state;
pub mod check;
pub mod face;
pub mod generator;
pub mod cutproject;
pub mod multigrid;
pub mod style;
pub mod statecode;
pub mod config;

#[cfg(feature = "render")]
pub mod render;

pub use check::CheckAxes;
pub use cutproject::{CutProjectGenerator, WalkResult};
pub use face::{Face, face_type_index, num_face_types};
pub use generator::{Generator, Method};
pub use multigrid::MultigridGenerator;
pub use state::{TilingState, MAX_DIMS, MIN_DIMS};
pub use statecode::SavedState;
pub use style::{Rgb, Style};
