//! Book cover geometry and the two-page layout template.
//!
//! Spine width follows the bindery formula: interior block thickness
//! (`pages / PPI`) plus both cover boards (`2 x caliper`). The template
//! emitter draws the outside and inside of the full cover spread with
//! trim, spine, hinge, safety, and glue-area guides.

mod spine;
mod template;

pub use spine::{cover_geometry, CoverGeometry};
pub use template::{render_cover_template, template_file_name, write_cover_template};

pub use press_core::{PressError, Result};
