/// Food guessing game module
pub mod game;
pub mod renderer;

pub use game::{Feedback, FoodGuessGame};
pub use renderer::{flag_emoji, FoodGuessRenderer};
