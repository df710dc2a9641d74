//////////////////////////////////////////////////////////////////////
// common interface of the tiling generators

use phf::phf_map;

use crate::cutproject::CutProjectGenerator;
use crate::face::Face;
use crate::multigrid::MultigridGenerator;
use crate::state::TilingState;

// produce the faces visible in a view_width x view_height window
// (lattice units) centered on the origin of the view plane.
//
// implementations are pure functions of their inputs, so they can be
// swapped freely or run on other threads.
pub trait Generator {
    fn generate(&self, state: &TilingState, view_width: f64, view_height: f64) -> Vec<Face>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    CutProject,
    Multigrid,
}

// define a lookup table matching method names to generators
static METHOD_LOOKUP: phf::Map<&'static str, Method> = phf_map! {
    "cutproject" => Method::CutProject,
    "multigrid" => Method::Multigrid,
};

impl Default for Method {
    fn default() -> Self { Method::Multigrid }
}

impl Method {

    pub fn from_name(name: &str) -> Option<Method> {
        METHOD_LOOKUP.get(name).cloned()
    }

    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = METHOD_LOOKUP.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn name(self) -> &'static str {
        match self {
            Method::CutProject => "cutproject",
            Method::Multigrid => "multigrid",
        }
    }

    pub fn generator(self) -> Box<dyn Generator> {
        match self {
            Method::CutProject => Box::new(CutProjectGenerator::default()),
            Method::Multigrid => Box::new(MultigridGenerator),
        }
    }

}

//////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn method_lookup() {
        assert_eq!(Method::from_name("multigrid"), Some(Method::Multigrid));
        assert_eq!(Method::from_name("cutproject"), Some(Method::CutProject));
        assert_eq!(Method::from_name("voronoi"), None);
        for name in Method::names() {
            assert_eq!(Method::from_name(name).map(Method::name), Some(name));
        }
    }

}
