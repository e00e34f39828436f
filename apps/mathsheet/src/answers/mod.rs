// Answer sheet: width estimation for math markup and flow-packing of answer cards.
// Produces a typed entry stream; LaTeX rendering of that stream happens downstream.

pub mod estimator;
pub mod handlers;
pub mod packer;

pub use estimator::{classify, estimate_width, CardType};
pub use packer::{pack_answers, AnswerSlot, PackedAnswers};
