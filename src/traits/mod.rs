pub mod atom;

pub use atom::Atom;
