//! Rule-based intent classification.
//!
//! Two classifiers, one per document shape. Each is an ordered first-match
//! chain of pattern tests over the normalized question; reordering the
//! steps changes which topic a question resolves to, so the order is part
//! of the contract. `None` means "no answer here, try the next handler".

pub mod municipality;
pub mod venue;

pub use municipality::MunicipalityClassifier;
pub use venue::VenueClassifier;
