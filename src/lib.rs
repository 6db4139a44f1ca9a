//! Review dataset preparation: clean raw reviews, split them, and turn each
//! user's and item's reviews into fixed-length word id sequences.

pub mod clean;
pub mod cli;
pub mod index;
pub mod lemma;
pub mod length;
pub mod pipeline;
pub mod reviews;
pub mod split;
pub mod vocab;
